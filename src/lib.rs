//! bom-explorer - Bill-of-Materials explorer and editor core
//!
//! This library rebuilds multi-level BOM trees from the flat rows served by
//! an ERP-backed REST API, attaches routing steps to the components that own
//! them, and plans drag-and-drop edits under the ERP lock rules. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_structure`): Rows, tree reconstruction and editing policies
//! - **Application Layer** (`application`): The editor session, read models and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bom_explorer::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let repository = SnapshotFileRepository::new(PathBuf::from("bom.json"));
//! let request = BomRequest::new("B-100", None, LoadMode::Full);
//! let session = BomEditorSession::new(repository, StderrNotifier::new(), request);
//!
//! session.reload().await?;
//!
//! let output = TextTreeFormatter::new().format(&session.read_model())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_structure;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrNotifier;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, SnapshotFileRepository, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonTreeFormatter, TextTreeFormatter};
    pub use crate::adapters::outbound::network::HttpBomRepository;
    pub use crate::application::dto::{BomRequest, EditOutcome, LoadMode, OutputFormat};
    pub use crate::application::read_models::{BomReadModel, BomReadModelBuilder};
    pub use crate::application::use_cases::BomEditorSession;
    pub use crate::bom_structure::domain::{
        BomForest, BomHeader, BomSnapshot, ComponentChanges, ComponentRow, ComponentSource,
        DropMode, LookupTables, MutationIntent, NodeId, Operation, RawComponentRow,
        RoutingRow, RoutingStepDraft, TreeAnomaly, TreeNode,
    };
    pub use crate::bom_structure::policies::{LockEvaluator, MutationPlanner, PolicyViolation};
    pub use crate::bom_structure::services::{
        BomTreeBuilder, CycleAssociator, DragGesture, DropZoneClassifier, NodeRect,
        ResolvedDrop, RowNormalizer,
    };
    pub use crate::ports::outbound::{
        BomRepository, MutationResponse, Notifier, OutputPresenter, TreeFormatter,
    };
    pub use crate::shared::Result;
}
