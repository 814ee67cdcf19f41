//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of a loaded BOM for rendering.

mod bom_read_model;
mod bom_read_model_builder;

pub use bom_read_model::{
    BomReadModel, BomSummaryView, ComponentView, CycleView, LockView, NodeView, NodeViewKind,
};
pub use bom_read_model_builder::BomReadModelBuilder;
