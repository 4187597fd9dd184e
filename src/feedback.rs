//! Key click feedback.
//!
//! Feedback is fire-and-forget: implementations must return immediately and
//! never touch controller state.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::trace;

/// Plays the key click.
pub trait KeyFeedback {
    /// Starts a click without waiting for it to finish.
    fn click(&self);
}

/// Feedback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl KeyFeedback for Silent {
    fn click(&self) {}
}

/// Rings the terminal bell from a detached worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl KeyFeedback for TerminalBell {
    fn click(&self) {
        let spawned = thread::Builder::new()
            .name("key-click".to_string())
            .spawn(|| {
                let mut stderr = std::io::stderr();
                // A lost click is not worth reporting
                let _ = stderr.write_all(b"\x07");
                let _ = stderr.flush();
            });

        if let Err(e) = spawned {
            trace!("failed to spawn key click worker: {e}");
        }
    }
}

/// Counts clicks instead of playing them.
#[derive(Debug, Clone, Default)]
pub struct ClickCounter {
    count: Arc<AtomicUsize>,
}

impl ClickCounter {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicks played so far, across all clones of this counter.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl KeyFeedback for ClickCounter {
    fn click(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
