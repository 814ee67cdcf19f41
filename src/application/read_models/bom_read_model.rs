//! BOM read model for rendering
//!
//! Node views carry the canonical row plus what a renderer would otherwise
//! have to recompute: per-operation lock flags, lookup descriptions and
//! formatted step times.

use crate::bom_structure::domain::{BomHeader, ComponentRow, NodeId, RoutingRow};
use serde::Serialize;

/// Main read model of one loaded BOM
#[derive(Debug, Clone, Serialize)]
pub struct BomReadModel {
    pub header: BomHeader,
    pub summary: BomSummaryView,
    pub roots: Vec<NodeView>,
    /// Human-readable tree anomalies, in detection order
    pub anomalies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomSummaryView {
    pub component_count: usize,
    pub cycle_count: usize,
    pub anomaly_count: usize,
}

/// One rendered node, same shape as the tree: `id`, `type`, `level`, `data`, `children`
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub level: i64,
    #[serde(flatten)]
    pub kind: NodeViewKind,
    pub children: Vec<NodeView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeViewKind {
    Component(ComponentView),
    Cycle(CycleView),
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    #[serde(flatten)]
    pub row: ComponentRow,
    pub locks: LockView,
}

/// Lock state of a component for every operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockView {
    pub modify: bool,
    pub replace: bool,
    pub add_under: bool,
    pub add_sibling: bool,
    pub delete: bool,
}

impl LockView {
    /// True when the line itself cannot be touched
    pub fn is_read_only(&self) -> bool {
        self.modify && self.replace && self.delete
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleView {
    #[serde(flatten)]
    pub row: RoutingRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_center_description: Option<String>,
    /// `HH:MM:SS`
    pub processing: String,
    /// `HH:MM:SS`
    pub setup: String,
}
