// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use tempfile::TempDir;

fn setup() -> (TempDir, ErrorLog) {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::new(dir.path().join("failed_jobs.txt"));
    (dir, log)
}

#[test]
fn reset_creates_empty_file() {
    let (_dir, log) = setup();
    log.reset().unwrap();
    assert!(log.path().exists());
    assert!(!log.has_entries());
    assert!(log.entries().unwrap().is_empty());
}

#[test]
fn reset_truncates_previous_run() {
    let (_dir, log) = setup();
    std::fs::write(log.path(), "/old/run.mp3\n").unwrap();
    assert!(log.has_entries());

    log.reset().unwrap();
    assert!(!log.has_entries());
}

#[test]
fn reset_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let log = ErrorLog::new(dir.path().join("logs/nested/failed.txt"));
    log.reset().unwrap();
    assert!(log.path().exists());
}

#[test]
fn appends_one_path_per_line() {
    let (_dir, log) = setup();
    log.reset().unwrap();
    log.append(Path::new("/in/b.mp3"));
    log.append(Path::new("/in/d e.mp3"));

    assert_eq!(log.entries().unwrap(), ["/in/b.mp3", "/in/d e.mp3"]);
    assert!(log.has_entries());
}

#[test]
fn missing_file_reads_as_empty() {
    let (_dir, log) = setup();
    assert!(log.entries().unwrap().is_empty());
    assert!(!log.has_entries());
}

#[test]
fn append_to_unwritable_path_does_not_panic() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened for appending.
    let log = ErrorLog::new(dir.path());
    log.append(Path::new("/in/a.mp3"));
}

#[test]
fn concurrent_appends_do_not_interleave() {
    let (_dir, log) = setup();
    log.reset().unwrap();
    let log = Arc::new(log);

    let writers: Vec<_> = (0..8)
        .map(|w| {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for i in 0..25 {
                    log.append(Path::new(&format!("/in/worker-{w}/track-{i:02}.mp3")));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), 200);
    assert!(entries.iter().all(|line| line.starts_with("/in/worker-") && line.ends_with(".mp3")));
}

#[cfg(unix)]
#[test]
fn non_utf8_paths_are_written_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (_dir, log) = setup();
    log.reset().unwrap();
    log.append(Path::new(OsStr::from_bytes(b"/in/\xFF.mp3")));

    assert_eq!(std::fs::read(log.path()).unwrap(), b"/in/\xFF.mp3\n");
    assert_eq!(log.entries().unwrap(), ["/in/\u{FFFD}.mp3"]);
}
