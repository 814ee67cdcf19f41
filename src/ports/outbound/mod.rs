/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (BOM backend, file system, console).
pub mod bom_repository;
pub mod formatter;
pub mod notifier;
pub mod output_presenter;

pub use bom_repository::{BomRepository, MutationResponse};
pub use formatter::TreeFormatter;
pub use notifier::Notifier;
pub use output_presenter::OutputPresenter;
