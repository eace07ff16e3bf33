// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::TempDir;

struct Dirs {
    _root: TempDir,
    input: std::path::PathBuf,
    output: std::path::PathBuf,
}

fn setup(files: &[&str]) -> Dirs {
    let root = TempDir::new().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir_all(&input).unwrap();
    fs::create_dir_all(&output).unwrap();
    for name in files {
        fs::write(input.join(name), b"data").unwrap();
    }
    Dirs { _root: root, input, output }
}

fn names(found: &[Discovered]) -> Vec<String> {
    found.iter().map(|d| d.job.id().to_string()).collect()
}

#[test]
fn picks_matching_extension_sorted() {
    let dirs = setup(&["c.mp3", "a.mp3", "notes.txt", "b.mp3"]);
    let found = discover(&dirs.input, &dirs.output, "mp3", false).unwrap();
    assert_eq!(names(&found), ["a.mp3", "b.mp3", "c.mp3"]);
    assert_eq!(found[0].job.destination(), dirs.output.join("a.mp3"));
    assert!(found.iter().all(|d| !d.skip));
}

#[yare::parameterized(
    upper_case_file = { "LOUD.MP3", "mp3" },
    dotted_config   = { "a.mp3", ".mp3" },
    upper_config    = { "a.mp3", "MP3" },
    other_extension = { "a.flac", "flac" },
)]
fn extension_match_is_case_insensitive(file: &str, extension: &str) {
    let dirs = setup(&[file]);
    let found = discover(&dirs.input, &dirs.output, extension, false).unwrap();
    assert_eq!(names(&found), [file]);
}

#[test]
fn ignores_directories_and_extensionless_files() {
    let dirs = setup(&["README", "a.mp3"]);
    fs::create_dir(dirs.input.join("album.mp3")).unwrap();
    let found = discover(&dirs.input, &dirs.output, "mp3", false).unwrap();
    assert_eq!(names(&found), ["a.mp3"]);
}

#[test]
fn does_not_recurse() {
    let dirs = setup(&["a.mp3"]);
    fs::create_dir(dirs.input.join("sub")).unwrap();
    fs::write(dirs.input.join("sub/nested.mp3"), b"data").unwrap();
    let found = discover(&dirs.input, &dirs.output, "mp3", false).unwrap();
    assert_eq!(names(&found), ["a.mp3"]);
}

#[test]
fn existing_output_is_skipped_unless_forced() {
    let dirs = setup(&["a.mp3", "b.mp3"]);
    fs::write(dirs.output.join("a.mp3"), b"done before").unwrap();

    let found = discover(&dirs.input, &dirs.output, "mp3", false).unwrap();
    assert!(found[0].skip);
    assert!(!found[1].skip);

    let forced = discover(&dirs.input, &dirs.output, "mp3", true).unwrap();
    assert!(forced.iter().all(|d| !d.skip));
}

#[test]
fn empty_directory_yields_nothing() {
    let dirs = setup(&[]);
    assert!(discover(&dirs.input, &dirs.output, "mp3", false).unwrap().is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let dirs = setup(&[]);
    assert!(discover(&dirs.input.join("nope"), &dirs.output, "mp3", false).is_err());
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_discovered_with_raw_destinations() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dirs = setup(&["b.mp3"]);
    fs::write(dirs.input.join(OsStr::from_bytes(b"\xFF.mp3")), b"data").unwrap();

    let found = discover(&dirs.input, &dirs.output, "mp3", false).unwrap();

    assert_eq!(names(&found), ["\\xFF.mp3", "b.mp3"]);
    assert_eq!(found[0].job.destination(), dirs.output.join(OsStr::from_bytes(b"\xFF.mp3")));
}
