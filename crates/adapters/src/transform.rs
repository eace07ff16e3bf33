// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loudness normalization through an external executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Default integrated loudness target in LUFS.
pub const DEFAULT_TARGET_LUFS: f64 = -14.0;
/// Maximum true peak in dBTP passed to the loudnorm filter.
pub const TRUE_PEAK_DBTP: f64 = -1.5;
/// Loudness range target passed to the loudnorm filter.
pub const LOUDNESS_RANGE: f64 = 11.0;

/// Errors from transform operations
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transform exited with {}", exit_label(.code))]
    Failed { code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Arguments of one transform invocation.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub target_lufs: f64,
}

/// Adapter for the external transform.
///
/// Calls are blocking and uncancellable; a zero exit status is the only
/// success signal.
pub trait TransformAdapter: Send + Sync + 'static {
    fn normalize(&self, request: &TransformRequest<'_>) -> Result<(), TransformError>;
}

/// Runs ffmpeg's `loudnorm` filter as a subprocess.
///
/// Arguments are passed as a vector, never through a shell. All standard
/// streams are nulled so ffmpeg output cannot interleave with the dashboard.
#[derive(Debug, Clone)]
pub struct FfmpegTransform {
    program: PathBuf,
}

impl FfmpegTransform {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for a request (without the program itself).
    pub fn args(&self, request: &TransformRequest<'_>) -> Vec<OsString> {
        let filter = format!(
            "loudnorm=I={}:TP={}:LRA={}",
            request.target_lufs, TRUE_PEAK_DBTP, LOUDNESS_RANGE
        );
        vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-i".into(),
            request.source.into(),
            "-af".into(),
            filter.into(),
            request.destination.into(),
        ]
    }
}

impl TransformAdapter for FfmpegTransform {
    fn normalize(&self, request: &TransformRequest<'_>) -> Result<(), TransformError> {
        tracing::debug!(
            program = %self.program.display(),
            source = %request.source.display(),
            destination = %request.destination.display(),
            target = request.target_lufs,
            "running transform"
        );
        let status = Command::new(&self.program)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| TransformError::Spawn { program: self.program.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(TransformError::Failed { code: status.code() })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{TransformAdapter, TransformError, TransformRequest};
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded transform invocation
    #[derive(Debug, Clone, PartialEq)]
    pub struct TransformCall {
        pub source: PathBuf,
        pub destination: PathBuf,
        pub target_lufs: f64,
    }

    #[derive(Default)]
    struct FakeTransformState {
        calls: Vec<TransformCall>,
        failing: HashSet<String>,
        panicking: HashSet<String>,
        delay: Duration,
    }

    /// Fake transform for testing.
    ///
    /// Succeeds unless the source file name was registered with
    /// [`FakeTransform::fail_on`] or [`FakeTransform::panic_on`]. Tracks how
    /// many calls overlapped.
    #[derive(Clone, Default)]
    pub struct FakeTransform {
        inner: Arc<Mutex<FakeTransformState>>,
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl FakeTransform {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every call whose source file name equals `name`.
        pub fn fail_on(self, name: &str) -> Self {
            self.inner.lock().failing.insert(name.to_string());
            self
        }

        /// Panic inside every call whose source file name equals `name`.
        pub fn panic_on(self, name: &str) -> Self {
            self.inner.lock().panicking.insert(name.to_string());
            self
        }

        /// Sleep this long inside every call.
        pub fn with_delay(self, delay: Duration) -> Self {
            self.inner.lock().delay = delay;
            self
        }

        /// Get all recorded calls, in call order
        pub fn calls(&self) -> Vec<TransformCall> {
            self.inner.lock().calls.clone()
        }

        /// Highest number of calls that were running at the same time
        pub fn peak_concurrency(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    impl TransformAdapter for FakeTransform {
        #[allow(clippy::panic)]
        fn normalize(&self, request: &TransformRequest<'_>) -> Result<(), TransformError> {
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(running, Ordering::SeqCst);

            let name = request
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (delay, fail, panic) = {
                let mut state = self.inner.lock();
                state.calls.push(TransformCall {
                    source: request.source.to_path_buf(),
                    destination: request.destination.to_path_buf(),
                    target_lufs: request.target_lufs,
                });
                (state.delay, state.failing.contains(&name), state.panicking.contains(&name))
            };

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if panic {
                panic!("fake transform panicked on {name}");
            }
            if fail {
                Err(TransformError::Failed { code: Some(1) })
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransform, TransformCall};

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
