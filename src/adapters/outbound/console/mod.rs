/// Console adapters writing to stderr
mod stderr_notifier;

pub use stderr_notifier::StderrNotifier;
