// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-place terminal drawing for the dashboard.
//!
//! The dashboard only needs a handful of capabilities: clear the screen,
//! write a full row, hide and show the cursor. Implementations that cannot
//! draw may turn every call into a no-op.

use std::io::{self, Stdout, Write};

use crossterm::{cursor, queue, style, terminal};

/// Width assumed when the terminal cannot report its size.
pub const FALLBACK_WIDTH: u16 = 80;

/// Adapter for a drawable terminal region.
pub trait TerminalAdapter: Send + 'static {
    /// Terminal size as `(columns, rows)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Prepare for drawing: clear the screen and hide the cursor.
    fn begin(&mut self) -> io::Result<()>;

    /// Replace row `row` (0-based) with `text`, clearing the remainder.
    fn write_row(&mut self, row: u16, text: &str) -> io::Result<()>;

    /// Push queued output to the terminal.
    fn flush(&mut self) -> io::Result<()>;

    /// Move the cursor below a region of `rows` rows and show it again.
    fn finish(&mut self, rows: u16) -> io::Result<()>;
}

/// Terminal backed by crossterm on stdout.
pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalAdapter for CrosstermTerminal {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn begin(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )
    }

    fn write_row(&mut self, row: u16, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            style::Print(text),
            terminal::Clear(terminal::ClearType::UntilNewLine)
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn finish(&mut self, rows: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, rows), cursor::Show, style::Print("\n"))?;
        self.out.flush()
    }
}

/// Terminal that draws nothing (non-TTY output, `--no-dashboard`).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTerminal;

impl TerminalAdapter for NoopTerminal {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok((FALLBACK_WIDTH, 24))
    }

    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_row(&mut self, _row: u16, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, _rows: u16) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::TerminalAdapter;
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::io;
    use std::sync::Arc;

    /// Rows written between two flushes, keyed by row number
    pub type Frame = BTreeMap<u16, String>;

    #[derive(Default)]
    struct FakeTerminalState {
        width: u16,
        began: bool,
        finished: Option<u16>,
        pending: Frame,
        frames: Vec<Frame>,
        fail_after: Option<usize>,
        calls: usize,
    }

    /// Fake terminal for testing.
    ///
    /// Collects rows into frames on every `flush`. Clones share state, so a
    /// test keeps one handle while the renderer owns the other.
    #[derive(Clone)]
    pub struct FakeTerminal {
        inner: Arc<Mutex<FakeTerminalState>>,
    }

    impl Default for FakeTerminal {
        fn default() -> Self {
            Self::new(80)
        }
    }

    impl FakeTerminal {
        pub fn new(width: u16) -> Self {
            Self { inner: Arc::new(Mutex::new(FakeTerminalState { width, ..Default::default() })) }
        }

        /// Make every call after the first `calls` fail with `io::ErrorKind::Unsupported`.
        pub fn failing_after(self, calls: usize) -> Self {
            self.inner.lock().fail_after = Some(calls);
            self
        }

        /// Frames flushed so far
        pub fn frames(&self) -> Vec<Frame> {
            self.inner.lock().frames.clone()
        }

        pub fn began(&self) -> bool {
            self.inner.lock().began
        }

        /// Region height passed to `finish`, if it was called
        pub fn finished(&self) -> Option<u16> {
            self.inner.lock().finished
        }

        fn check(state: &mut FakeTerminalState) -> io::Result<()> {
            state.calls += 1;
            match state.fail_after {
                Some(limit) if state.calls > limit => {
                    Err(io::Error::new(io::ErrorKind::Unsupported, "fake terminal unavailable"))
                }
                _ => Ok(()),
            }
        }
    }

    impl TerminalAdapter for FakeTerminal {
        fn size(&mut self) -> io::Result<(u16, u16)> {
            let mut state = self.inner.lock();
            Self::check(&mut state)?;
            Ok((state.width, 24))
        }

        fn begin(&mut self) -> io::Result<()> {
            let mut state = self.inner.lock();
            Self::check(&mut state)?;
            state.began = true;
            Ok(())
        }

        fn write_row(&mut self, row: u16, text: &str) -> io::Result<()> {
            let mut state = self.inner.lock();
            Self::check(&mut state)?;
            state.pending.insert(row, text.to_string());
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            let mut state = self.inner.lock();
            Self::check(&mut state)?;
            let frame = std::mem::take(&mut state.pending);
            state.frames.push(frame);
            Ok(())
        }

        fn finish(&mut self, rows: u16) -> io::Result<()> {
            let mut state = self.inner.lock();
            Self::check(&mut state)?;
            state.finished = Some(rows);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTerminal, Frame};

#[cfg(test)]
#[path = "terminal_tests.rs"]
mod tests;
