use crate::bom_structure::domain::{ComponentRow, RoutingRow, TreeNode};

/// CycleAssociator service selecting the routing steps of one component
///
/// Both sides arrive already string-normalized (see
/// [`flex`](crate::bom_structure::domain::flex)), so numeric and textual
/// identifiers from the backend compare equal here.
pub struct CycleAssociator;

impl CycleAssociator {
    /// Routing rows forming the production cycle of `node`, by ascending `RtgStep`
    ///
    /// Cycle nodes have no cycle of their own and yield an empty list.
    pub fn associate<'a>(node: &TreeNode, routing: &'a [RoutingRow]) -> Vec<&'a RoutingRow> {
        match node.component() {
            Some(row) => Self::matching_indices(row, routing)
                .into_iter()
                .map(|index| &routing[index])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Indices into `routing` matching `row`, ordered by step
    pub(crate) fn matching_indices(row: &ComponentRow, routing: &[RoutingRow]) -> Vec<usize> {
        let mut indices: Vec<usize> = routing
            .iter()
            .enumerate()
            .filter(|(_, step)| Self::matches(row, step))
            .map(|(index, _)| index)
            .collect();
        indices.sort_by_key(|&index| routing[index].step());
        indices
    }

    /// Matching rule for one routing row
    ///
    /// - Level-0 steps belong to the root item: the component must be root
    ///   level, share the `BOMId` and be the named item, or own the `BOMId`
    ///   when the step names none.
    /// - Other steps need the same `BOMId` plus a matching identity; steps
    ///   without identity belong to the component owning the `BOMId` rather
    ///   than to those that inherited it.
    pub fn matches(row: &ComponentRow, step: &RoutingRow) -> bool {
        let same_bom = match (&row.bom_id, &step.bom_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if !same_bom {
            return false;
        }

        if step.is_root_cycle() {
            return row.is_root_level()
                && match step.item_id.as_deref() {
                    Some(item) => row.identity_matches(item),
                    None => !row.bom_id_inherited,
                };
        }

        match step.identity() {
            Some(identity) => row.identity_matches(identity),
            None => !row.bom_id_inherited,
        }
    }
}
