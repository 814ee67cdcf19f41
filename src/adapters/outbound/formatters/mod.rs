/// Formatter adapters for the supported output formats
mod json_formatter;
mod text_tree_formatter;

pub use json_formatter::JsonTreeFormatter;
pub use text_tree_formatter::TextTreeFormatter;
