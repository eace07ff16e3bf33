// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and descriptor.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

crate::define_id! {
    /// Identifier of a job within a run.
    ///
    /// Derived from the source file name, so two jobs in the same input
    /// directory do not share an ID.
    pub struct JobId;
}

impl JobId {
    /// Derive a job ID from a source path (its file name).
    ///
    /// Bytes that are not valid UTF-8 are written as `\xNN`, so distinct
    /// names keep distinct IDs. Paths without a file name component fall
    /// back to the full path.
    pub fn from_path(path: &Path) -> Self {
        Self::new(escape_name(path.file_name().unwrap_or(path.as_os_str())))
    }
}

fn escape_name(name: &OsStr) -> String {
    if let Some(s) = name.to_str() {
        return s.to_string();
    }
    let mut out = String::new();
    for chunk in name.as_encoded_bytes().utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            out.push_str(&format!("\\x{byte:02X}"));
        }
    }
    out
}

/// One unit of work: transform `source` into `destination`.
///
/// Immutable once built. The queue owns it until exactly one worker
/// dequeues it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    id: JobId,
    source: PathBuf,
    destination: PathBuf,
}

impl JobDescriptor {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self { id: JobId::from_path(&source), source, destination: destination.into() }
    }

    /// Build a descriptor whose destination is `output_dir/<source file name>`.
    ///
    /// The file name is reused byte for byte.
    pub fn into_dir(source: impl Into<PathBuf>, output_dir: &Path) -> Self {
        let source = source.into();
        let id = JobId::from_path(&source);
        let destination = match source.file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.join(id.as_str()),
        };
        Self { id, source, destination }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
