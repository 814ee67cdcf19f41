mod cycle_associator;
mod drop_zone;
mod row_normalizer;
mod tree_builder;

pub use cycle_associator::CycleAssociator;
pub use drop_zone::{DragGesture, DropZoneClassifier, NodeRect, ResolvedDrop};
pub use row_normalizer::RowNormalizer;
pub use tree_builder::BomTreeBuilder;
