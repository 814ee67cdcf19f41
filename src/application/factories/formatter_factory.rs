use crate::adapters::outbound::formatters::{JsonTreeFormatter, TextTreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TreeFormatter;

/// Factory for creating tree formatters
///
/// Selects the infrastructure adapter matching the requested output format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use bom_explorer::application::dto::OutputFormat;
    /// use bom_explorer::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn TreeFormatter> {
        match format {
            OutputFormat::Tree => Box::new(TextTreeFormatter::new()),
            OutputFormat::Json => Box::new(JsonTreeFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use bom_explorer::application::dto::OutputFormat;
    /// use bom_explorer::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Tree);
    /// assert_eq!(message, "📝 Rendering BOM tree...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Tree => "📝 Rendering BOM tree...",
            OutputFormat::Json => "📝 Generating JSON output...",
        }
    }
}
