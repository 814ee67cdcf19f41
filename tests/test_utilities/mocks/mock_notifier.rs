use bom_explorer::prelude::*;

/// Mock Notifier for testing that captures messages
#[derive(Default, Clone)]
pub struct MockNotifier {
    pub messages: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.with_prefix("Warning: ")
    }

    pub fn errors(&self) -> Vec<String> {
        self.with_prefix("Error: ")
    }

    fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.get_messages()
            .iter()
            .filter_map(|m| m.strip_prefix(prefix).map(String::from))
            .collect()
    }

    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

impl Notifier for MockNotifier {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_warning(&self, message: &str) {
        self.push(format!("Warning: {}", message));
    }

    fn report_error(&self, message: &str) {
        self.push(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.push(format!("Completed: {}", message));
    }

    fn start_loading(&self, message: &str) {
        self.push(format!("Loading: {}", message));
    }

    fn finish_loading(&self) {
        self.push("Loaded".to_string());
    }
}
