// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input enumeration.

use std::fs;
use std::io;
use std::path::Path;

use lq_core::JobDescriptor;

/// Extension of files picked up when none is configured.
pub const DEFAULT_EXTENSION: &str = "mp3";

/// A job found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub job: JobDescriptor,
    /// Destination exists and re-processing was not forced
    pub skip: bool,
}

/// List eligible files in `input_dir` (non-recursive), sorted by file name.
///
/// A file is eligible when it is a regular file (symlinks followed) whose
/// extension matches `extension`, ignoring ASCII case and a leading dot.
pub fn discover(
    input_dir: &Path,
    output_dir: &Path,
    extension: &str,
    force: bool,
) -> io::Result<Vec<Discovered>> {
    let extension = extension.trim_start_matches('.');
    let mut found = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        let job = JobDescriptor::into_dir(path, output_dir);
        let skip = !force && job.destination().exists();
        found.push(Discovered { job, skip });
    }
    found.sort_by(|a, b| a.job.id().cmp(b.job.id()));
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
