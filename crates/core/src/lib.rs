// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lq-core: Core types for the loudq batch runner

pub mod macros;

pub mod id;
pub mod job;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use id::short;
pub use job::{JobDescriptor, JobId};
pub use state::{JobState, StateCounts, TransitionError};
