use indicatif::{ProgressBar, ProgressStyle};

/// Percentage bar for a whole sync run.
pub fn create_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    bar
}
