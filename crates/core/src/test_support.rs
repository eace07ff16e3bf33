// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::JobDescriptor;
use std::path::Path;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::state::JobState;
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Pending),
            Just(JobState::Working),
            Just(JobState::Done),
            Just(JobState::Error),
            Just(JobState::Skipped),
        ]
    }
}

// ── Descriptor factories ────────────────────────────────────────────────

/// Descriptor for `/in/<name>` → `/out/<name>`.
pub fn job(name: &str) -> JobDescriptor {
    JobDescriptor::into_dir(Path::new("/in").join(name), Path::new("/out"))
}

/// Descriptors for `count` numbered files (`track-000.mp3`, ...).
pub fn numbered_jobs(count: usize) -> Vec<JobDescriptor> {
    (0..count).map(|i| job(&format!("track-{i:03}.mp3"))).collect()
}
