use crate::bom_structure::domain::{BomForest, ComponentRow, NodeId, Operation};

/// LockEvaluator policy deciding whether ERP ownership forbids an operation
///
/// Rules:
/// 1. Root-level rows (level 0 or 1) are locked only by `parentBOMStato_erp`,
///    whatever the operation.
/// 2. Deeper rows are locked for modify/replace/add-under/delete when either
///    their own BOM or the BOM listing them comes from the ERP.
/// 3. Adding a sibling to a deeper row only looks at the resolved parent's own
///    BOM; the row's flags are irrelevant because the row itself is untouched.
pub struct LockEvaluator;

impl LockEvaluator {
    pub fn is_locked(
        row: &ComponentRow,
        operation: Operation,
        resolved_parent: Option<&ComponentRow>,
    ) -> bool {
        if row.is_root_level() {
            return row.erp.parent_bom.is_erp();
        }

        match operation {
            Operation::AddSibling => resolved_parent.is_some_and(|parent| parent.erp.bom.is_erp()),
            Operation::Modify | Operation::Replace | Operation::AddUnder | Operation::Delete => {
                row.erp.bom.is_erp() || row.erp.parent_bom.is_erp()
            }
        }
    }

    /// Evaluates a node of a built forest, resolving its parent through the
    /// builder's links; `None` when the id is unknown or is a cycle node
    pub fn is_node_locked(forest: &BomForest, node_id: &NodeId, operation: Operation) -> Option<bool> {
        let row = forest.find(node_id)?.component()?;
        let parent = forest.parent_of(node_id).and_then(|p| p.component());
        Some(Self::is_locked(row, operation, parent))
    }
}
