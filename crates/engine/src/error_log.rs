// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only log of failed jobs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Append-only list of source paths whose transform failed.
///
/// One path per line. Truncated once at the start of a run; afterwards only
/// workers write to it. Each `append()` opens, writes, and closes the file
/// under a dedicated lock, which is plenty for the write rate of failures.
pub struct ErrorLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or truncate the log file.
    pub fn reset(&self) -> io::Result<()> {
        let _guard = self.write_lock.lock();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        File::create(&self.path)?;
        Ok(())
    }

    /// Record a failed source path.
    ///
    /// Failures are logged via tracing but do not propagate; a broken log
    /// file must not take a worker down.
    pub fn append(&self, source: &Path) {
        if let Err(e) = self.write_line(source) {
            tracing::warn!(
                path = %self.path.display(),
                source = %source.display(),
                error = %e,
                "failed to write error log"
            );
        }
    }

    fn write_line(&self, source: &Path) -> io::Result<()> {
        let _guard = self.write_lock.lock();
        let mut line = source.as_os_str().as_encoded_bytes().to_vec();
        line.push(b'\n');
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(&line)
    }

    /// Lines currently in the log, lossily decoded. A missing file reads as
    /// empty.
    pub fn entries(&self) -> io::Result<Vec<String>> {
        match fs::read(&self.path) {
            Ok(content) => Ok(String::from_utf8_lossy(&content).lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Whether any failure was recorded.
    pub fn has_entries(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "error_log_tests.rs"]
mod tests;
