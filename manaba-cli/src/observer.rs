//! Progress and log reporting for a sync run.
//!
//! The pipeline reports through [`SyncObserver`] so the core crates stay
//! free of presentation concerns. The terminal adapter draws an indicatif
//! bar on stderr, leaving stdout for rendered or JSON output.

use indicatif::ProgressBar;
use tracing::info;

use crate::utils::tui;

pub trait SyncObserver {
    fn log(&self, message: &str);

    /// Overall completion, 0 to 100.
    fn progress(&self, percent: u64);

    fn finish(&self) {}
}

pub struct TerminalObserver {
    bar: ProgressBar,
}

impl TerminalObserver {
    pub fn new() -> Self {
        TerminalObserver {
            bar: tui::create_progress_bar(),
        }
    }
}

impl Default for TerminalObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncObserver for TerminalObserver {
    fn log(&self, message: &str) {
        self.bar.println(message);
    }

    fn progress(&self, percent: u64) {
        self.bar.set_position(percent.min(100));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Sends messages to the tracing log only; used with `--json`.
pub struct QuietObserver;

impl SyncObserver for QuietObserver {
    fn log(&self, message: &str) {
        info!("{}", message);
    }

    fn progress(&self, _percent: u64) {}
}

/// Map step `index` of `total` onto the `[from, to)` slice of the bar.
pub fn scaled(index: usize, total: usize, from: u64, to: u64) -> u64 {
    if total == 0 {
        return from;
    }
    from + (index as u64 * (to - from)) / total as u64
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;

    use super::SyncObserver;

    /// Records everything it is told.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub messages: RefCell<Vec<String>>,
        pub progress: RefCell<Vec<u64>>,
    }

    impl SyncObserver for RecordingObserver {
        fn log(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }

        fn progress(&self, percent: u64) {
            self.progress.borrow_mut().push(percent);
        }
    }
}
