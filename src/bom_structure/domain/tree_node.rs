use super::{ComponentRow, RoutingRow};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Deterministic node identifier, stable across rebuilds of the same data
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeData {
    Component(ComponentRow),
    Cycle(RoutingRow),
}

/// Node of the rebuilt BOM forest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub level: i64,
    #[serde(flatten)]
    pub data: NodeData,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn component(&self) -> Option<&ComponentRow> {
        match &self.data {
            NodeData::Component(row) => Some(row),
            NodeData::Cycle(_) => None,
        }
    }

    pub fn cycle(&self) -> Option<&RoutingRow> {
        match &self.data {
            NodeData::Cycle(row) => Some(row),
            NodeData::Component(_) => None,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self.data, NodeData::Cycle(_))
    }

    /// Components by `Line` first, then cycles by `RtgStep`
    pub fn sibling_order(&self, other: &TreeNode) -> Ordering {
        match (&self.data, &other.data) {
            (NodeData::Component(a), NodeData::Component(b)) => a.line.cmp(&b.line),
            (NodeData::Cycle(a), NodeData::Cycle(b)) => a.step().cmp(&b.step()),
            (NodeData::Component(_), NodeData::Cycle(_)) => Ordering::Less,
            (NodeData::Cycle(_), NodeData::Component(_)) => Ordering::Greater,
        }
    }

    /// Recursively sorts every child list; the sort is stable
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.sibling_order(b));
        for child in &mut self.children {
            child.sort_children();
        }
    }
}
