// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the collaborators a run talks to: the external transform
//! executable and the terminal.

pub mod terminal;
pub mod transform;

pub use terminal::{CrosstermTerminal, NoopTerminal, TerminalAdapter};
pub use transform::{FfmpegTransform, TransformAdapter, TransformError, TransformRequest};

#[cfg(any(test, feature = "test-support"))]
pub use terminal::{FakeTerminal, Frame};
#[cfg(any(test, feature = "test-support"))]
pub use transform::{FakeTransform, TransformCall};
