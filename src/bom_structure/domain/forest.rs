use super::{NodeId, TreeNode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Data-shape problem met while rebuilding the tree
///
/// Anomalies are never fatal: the offending row is kept, usually as a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeAnomaly {
    /// Neither the path nor the preceding rows yielded a parent
    UnresolvedParent {
        node_id: NodeId,
        path: String,
        level: i64,
    },
    /// The only parent candidate was one of the row's own descendants
    CyclicParent { node_id: NodeId, candidate: NodeId },
    /// No row qualified as a root; the first row was promoted
    NoRootFound { promoted: NodeId },
}

impl fmt::Display for TreeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeAnomaly::UnresolvedParent {
                node_id,
                path,
                level,
            } => write!(
                f,
                "no parent found for {} (level {}, path '{}'); shown as a root",
                node_id, level, path
            ),
            TreeAnomaly::CyclicParent { node_id, candidate } => write!(
                f,
                "parent candidate {} of {} is its own descendant; shown as a root",
                candidate, node_id
            ),
            TreeAnomaly::NoRootFound { promoted } => {
                write!(f, "no root-level row found; {} promoted to root", promoted)
            }
        }
    }
}

/// Ordered forest rebuilt from one BOM snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct BomForest {
    roots: Vec<TreeNode>,
    anomalies: Vec<TreeAnomaly>,
    /// Child-index path from `roots` to each node
    #[serde(skip)]
    locations: HashMap<NodeId, Vec<usize>>,
}

impl BomForest {
    pub fn new(roots: Vec<TreeNode>, anomalies: Vec<TreeAnomaly>) -> Self {
        let mut locations = HashMap::new();
        let mut stack: Vec<(Vec<usize>, &TreeNode)> = roots
            .iter()
            .enumerate()
            .map(|(i, node)| (vec![i], node))
            .collect();

        while let Some((location, node)) = stack.pop() {
            for (i, child) in node.children.iter().enumerate() {
                let mut child_location = location.clone();
                child_location.push(i);
                stack.push((child_location, child));
            }
            locations.insert(node.id.clone(), location);
        }

        Self {
            roots,
            anomalies,
            locations,
        }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn anomalies(&self) -> &[TreeAnomaly] {
        &self.anomalies
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        let location = self.locations.get(id)?;
        self.resolve(location)
    }

    /// Parent node, `None` for roots and unknown ids
    pub fn parent_of(&self, id: &NodeId) -> Option<&TreeNode> {
        let location = self.locations.get(id)?;
        match location.split_last() {
            Some((_, parent)) if !parent.is_empty() => self.resolve(parent),
            _ => None,
        }
    }

    fn resolve(&self, location: &[usize]) -> Option<&TreeNode> {
        let (first, rest) = location.split_first()?;
        let mut node = self.roots.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    /// Pre-order traversal
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack: Vec<&TreeNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn component_count(&self) -> usize {
        self.iter().filter(|n| !n.is_cycle()).count()
    }

    pub fn cycle_count(&self) -> usize {
        self.iter().filter(|n| n.is_cycle()).count()
    }
}
