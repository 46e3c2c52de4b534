//! Output targets for the progress worker.

use indicatif::{ProgressBar, ProgressStyle};

/// Somewhere the progress worker can draw.
pub trait ProgressSink: Send + 'static {
    /// Draws the current stage with one spinner frame.
    fn render(&mut self, stage: &str, frame: &str);

    /// Clears the output once loading is complete.
    fn finish(&mut self);
}

/// Spinner line on stderr, drawn with indicatif.
///
/// The frames come from the worker, so indicatif's own steady tick is not
/// enabled.
pub struct SpinnerSink {
    pb: ProgressBar,
}

impl SpinnerSink {
    /// Creates a spinner on stderr. It stays hidden when stderr is not a terminal.
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template(" loading {prefix} {msg:.yellow}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        Self { pb }
    }

    /// Wraps an existing progress bar, e.g. a hidden one.
    pub fn with_bar(pb: ProgressBar) -> Self {
        Self { pb }
    }
}

impl Default for SpinnerSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerSink {
    fn render(&mut self, stage: &str, frame: &str) {
        self.pb.set_prefix(stage.to_string());
        self.pb.set_message(frame.to_string());
        self.pb.tick();
    }

    fn finish(&mut self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_sink() {
        // Should not panic
        let mut sink = SpinnerSink::with_bar(ProgressBar::hidden());
        sink.render("go list", "⠋");
        sink.finish();
    }

    #[test]
    fn test_spinner_sink_creation() {
        let mut sink = SpinnerSink::new();
        sink.render("services", "⠙");
        sink.finish();
    }
}
