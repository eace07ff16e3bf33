// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ffmpeg_path=` lookup in the configuration file.

use std::path::{Path, PathBuf};

use thiserror::Error;

const FFMPEG_KEY: &str = "ffmpeg_path=";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("config file {} has no ffmpeg_path entry", .0.display())]
    MissingFfmpegPath(PathBuf),
}

/// First `ffmpeg_path=` line wins. An empty value counts as absent.
pub fn parse_ffmpeg_path(content: &str) -> Option<PathBuf> {
    let value = content
        .lines()
        .map(|line| line.trim_start().trim_end_matches('\r'))
        .find_map(|line| line.strip_prefix(FFMPEG_KEY))?;
    if value.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(value))
}

/// Read `path` and resolve the transform executable.
pub fn load_ffmpeg_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse_ffmpeg_path(&content).ok_or_else(|| ConfigError::MissingFfmpegPath(path.to_path_buf()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
