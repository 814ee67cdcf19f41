use super::CycleAssociator;
use crate::bom_structure::domain::{
    BomForest, ComponentRow, NodeData, NodeId, RoutingRow, TreeAnomaly, TreeNode,
};
use std::collections::{HashMap, HashSet};

/// Hands out node ids, suffixing `-2`, `-3`, ... on collision
#[derive(Default)]
struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    fn allocate(&mut self, base: String) -> NodeId {
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }
        self.taken.insert(candidate.clone());
        NodeId::new(candidate)
    }
}

struct Slot {
    id: NodeId,
    row: ComponentRow,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Outcome of looking for a row's parent
enum ParentLookup {
    Found(usize),
    /// Every candidate was a descendant of the row itself
    Cyclic(usize),
    Missing,
}

/// BomTreeBuilder service rebuilding the BOM forest from flat rows
///
/// The forest is always rebuilt from scratch; node ids depend only on
/// `(ComponentId, Line, Path)` and the row order, so rebuilding the same
/// snapshot yields the same ids.
pub struct BomTreeBuilder;

impl BomTreeBuilder {
    /// Builds the forest for normalized component rows and raw routing rows
    ///
    /// Parents are resolved by `Path` first, then positionally (nearest
    /// preceding row one level up). Rows that resolve to nothing become roots
    /// and are reported as anomalies on the returned forest.
    pub fn build(rows: &[ComponentRow], routing: &[RoutingRow]) -> BomForest {
        let mut ids = IdAllocator::default();
        let mut slots: Vec<Slot> = rows
            .iter()
            .map(|row| Slot {
                id: ids.allocate(Self::node_key(row)),
                row: row.clone(),
                parent: None,
                children: Vec::new(),
            })
            .collect();

        let mut path_index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            path_index.entry(row.path.as_str()).or_default().push(index);
        }

        let has_root_level_row = rows.iter().any(|row| row.level <= 1);
        let mut roots = Vec::new();
        let mut anomalies = Vec::new();

        for index in 0..rows.len() {
            let row = &rows[index];

            if row.level <= 0 {
                roots.push(index);
                continue;
            }

            let by_path = Self::lookup_by_path(&slots, &path_index, rows, index);
            let lookup = match by_path {
                ParentLookup::Found(_) => by_path,
                _ if row.level == 1 => by_path,
                _ => match Self::lookup_by_position(&slots, rows, index) {
                    ParentLookup::Missing => by_path,
                    positional => positional,
                },
            };

            match lookup {
                ParentLookup::Found(parent) => {
                    slots[index].parent = Some(parent);
                    slots[parent].children.push(index);
                }
                ParentLookup::Cyclic(candidate) => {
                    anomalies.push(TreeAnomaly::CyclicParent {
                        node_id: slots[index].id.clone(),
                        candidate: slots[candidate].id.clone(),
                    });
                    roots.push(index);
                }
                ParentLookup::Missing if row.level == 1 => roots.push(index),
                ParentLookup::Missing if index == 0 && !has_root_level_row => {
                    anomalies.push(TreeAnomaly::NoRootFound {
                        promoted: slots[index].id.clone(),
                    });
                    roots.push(index);
                }
                ParentLookup::Missing => {
                    anomalies.push(TreeAnomaly::UnresolvedParent {
                        node_id: slots[index].id.clone(),
                        path: row.path.clone(),
                        level: row.level,
                    });
                    roots.push(index);
                }
            }
        }

        for &root in &roots {
            Self::propagate_bom_id(&mut slots, root);
        }

        let mut claimed_root_cycles = HashSet::new();
        let nodes = roots
            .iter()
            .map(|&root| {
                let mut node =
                    Self::assemble(&slots, root, routing, &mut claimed_root_cycles, &mut ids);
                node.sort_children();
                node
            })
            .collect();

        BomForest::new(nodes, anomalies)
    }

    fn node_key(row: &ComponentRow) -> String {
        format!("{}-{}-{}", row.component_id, row.line, row.path)
    }

    /// Path minus its last segment, preferring the nearest preceding match
    /// when several rows share that path
    fn lookup_by_path(
        slots: &[Slot],
        path_index: &HashMap<&str, Vec<usize>>,
        rows: &[ComponentRow],
        index: usize,
    ) -> ParentLookup {
        let Some(candidates) = rows[index]
            .parent_path()
            .and_then(|parent_path| path_index.get(parent_path))
        else {
            return ParentLookup::Missing;
        };

        let preceding = candidates.iter().rev().find(|&&c| c < index);
        let ordered = preceding
            .into_iter()
            .chain(candidates.iter().filter(|&&c| c != index));

        let mut cyclic = None;
        for &candidate in ordered {
            if Self::is_descendant(slots, candidate, index) {
                cyclic.get_or_insert(candidate);
            } else {
                return ParentLookup::Found(candidate);
            }
        }
        cyclic.map_or(ParentLookup::Missing, ParentLookup::Cyclic)
    }

    /// Nearest preceding row whose level is exactly one less
    fn lookup_by_position(slots: &[Slot], rows: &[ComponentRow], index: usize) -> ParentLookup {
        let wanted = rows[index].level - 1;
        match rows[..index].iter().rposition(|row| row.level == wanted) {
            Some(candidate) if Self::is_descendant(slots, candidate, index) => {
                ParentLookup::Cyclic(candidate)
            }
            Some(candidate) => ParentLookup::Found(candidate),
            None => ParentLookup::Missing,
        }
    }

    /// True when `ancestor` appears on the parent chain of `node` (or is `node`)
    fn is_descendant(slots: &[Slot], node: usize, ancestor: usize) -> bool {
        let mut current = Some(node);
        while let Some(index) = current {
            if index == ancestor {
                return true;
            }
            current = slots[index].parent;
        }
        false
    }

    /// Copies `BOMId` down to children lacking one, transitively
    fn propagate_bom_id(slots: &mut [Slot], root: usize) {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let bom_id = slots[index].row.bom_id.clone();
            let children = slots[index].children.clone();
            for &child in &children {
                if slots[child].row.bom_id.is_none() && bom_id.is_some() {
                    slots[child].row.bom_id = bom_id.clone();
                    slots[child].row.bom_id_inherited = true;
                }
            }
            stack.extend(children);
        }
    }

    /// Builds the node for `index` in pre-order so that root-level cycles are
    /// claimed by the first matching node only
    fn assemble(
        slots: &[Slot],
        index: usize,
        routing: &[RoutingRow],
        claimed_root_cycles: &mut HashSet<usize>,
        ids: &mut IdAllocator,
    ) -> TreeNode {
        let slot = &slots[index];

        let mut cycle_nodes = Vec::new();
        for routing_index in CycleAssociator::matching_indices(&slot.row, routing) {
            let routing_row = &routing[routing_index];
            if routing_row.is_root_cycle() && !claimed_root_cycles.insert(routing_index) {
                continue;
            }
            cycle_nodes.push(TreeNode {
                id: ids.allocate(format!("{}/cycle-{}", slot.id, routing_row.step())),
                level: slot.row.level + 1,
                data: NodeData::Cycle(routing_row.clone()),
                children: Vec::new(),
            });
        }

        let mut children: Vec<TreeNode> = slot
            .children
            .iter()
            .map(|&child| Self::assemble(slots, child, routing, claimed_root_cycles, ids))
            .collect();
        children.extend(cycle_nodes);

        TreeNode {
            id: slot.id.clone(),
            level: slot.row.level,
            data: NodeData::Component(slot.row.clone()),
            children,
        }
    }
}
