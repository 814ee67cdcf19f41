use crate::ports::outbound::Notifier;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrNotifier adapter for notifications on stderr
///
/// This adapter implements the Notifier port, writing to stderr so it
/// doesn't interfere with stdout output. A spinner runs while a backend
/// call is pending.
pub struct StderrNotifier {
    spinner: RefCell<Option<ProgressBar>>,
    colored: bool,
}

impl StderrNotifier {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
            colored: true,
        }
    }

    /// Plain output, e.g. when stderr is redirected to a log file
    pub fn without_colors() -> Self {
        Self {
            spinner: RefCell::new(None),
            colored: false,
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }

    fn print(&self, prefix: &str, message: &str, paint: fn(&str) -> String) {
        self.clear_spinner();
        let line = format!("{} {}", prefix, message);
        if self.colored {
            eprintln!("{}", paint(&line));
        } else {
            eprintln!("{}", line);
        }
    }
}

impl Default for StderrNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for StderrNotifier {
    fn report(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message);
    }

    fn report_warning(&self, message: &str) {
        self.print("⚠️", message, |s| s.yellow().to_string());
    }

    fn report_error(&self, message: &str) {
        self.print("❌", message, |s| s.red().to_string());
    }

    fn report_completion(&self, message: &str) {
        self.print("✅", message, |s| s.green().to_string());
    }

    fn start_loading(&self, message: &str) {
        self.clear_spinner();
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn finish_loading(&self) {
        self.clear_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_creation() {
        let notifier = StderrNotifier::new();
        // Can't easily test stderr output, but verify it doesn't panic
        notifier.report("Loading BOM");
        notifier.report_warning("Row without parent");
        notifier.report_error("Backend unreachable");
        notifier.report_completion("Done");
    }

    #[test]
    fn test_loading_spinner_lifecycle() {
        let notifier = StderrNotifier::without_colors();
        notifier.start_loading("Fetching BOM...");
        assert!(notifier.spinner.borrow().is_some());

        notifier.start_loading("Dispatching...");
        notifier.finish_loading();
        assert!(notifier.spinner.borrow().is_none());
    }

    #[test]
    fn test_message_clears_spinner() {
        let notifier = StderrNotifier::default();
        notifier.start_loading("Fetching BOM...");
        notifier.report_error("failed");
        assert!(notifier.spinner.borrow().is_none());
    }
}
