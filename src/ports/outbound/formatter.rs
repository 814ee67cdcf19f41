use crate::application::read_models::BomReadModel;
use crate::shared::Result;

/// TreeFormatter port for rendering a loaded BOM
///
/// This port abstracts the rendering of the rebuilt forest
/// (text tree, JSON, ...).
pub trait TreeFormatter {
    /// Formats the BOM read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &BomReadModel) -> Result<String>;
}
