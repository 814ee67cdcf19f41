/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod bom_request;
mod edit_outcome;
mod output_format;

pub use bom_request::{BomRequest, LoadMode};
pub use edit_outcome::EditOutcome;
pub use output_format::OutputFormat;
