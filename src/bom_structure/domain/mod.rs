pub mod component_row;
pub mod flex;
pub mod forest;
pub mod mutation;
pub mod operation;
pub mod routing_row;
pub mod snapshot;
pub mod tree_node;

pub use component_row::{
    is_root_level, ComponentRow, ComponentType, ErpFlags, ErpStatus, Nature, RawComponentRow,
};
pub use forest::{BomForest, TreeAnomaly};
pub use mutation::{
    ComponentChanges, ComponentSource, LineAssignment, MutationIntent, RoutingStepDraft,
};
pub use operation::{DropMode, Operation};
pub use routing_row::{RoutingRow, StepDuration};
pub use snapshot::{BomHeader, BomSnapshot, LookupTables};
pub use tree_node::{NodeData, NodeId, TreeNode};
