/// Driven-side adapters: BOM sources, renderers, presenters and the notifier
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;
