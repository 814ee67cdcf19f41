//! Builder for constructing BomReadModel from a rebuilt forest

use super::bom_read_model::{
    BomReadModel, BomSummaryView, ComponentView, CycleView, LockView, NodeView, NodeViewKind,
};
use crate::bom_structure::domain::{
    BomForest, BomHeader, ComponentRow, LookupTables, NodeData, Operation, RoutingRow, TreeNode,
};
use crate::bom_structure::policies::LockEvaluator;

/// Builder for constructing BomReadModel from domain objects
///
/// Lookup tables are an explicit input; nothing here reads shared state.
pub struct BomReadModelBuilder;

impl BomReadModelBuilder {
    pub fn build(header: &BomHeader, forest: &BomForest, lookups: &LookupTables) -> BomReadModel {
        let roots = forest
            .roots()
            .iter()
            .map(|root| Self::build_node(root, None, lookups))
            .collect();

        BomReadModel {
            header: header.clone(),
            summary: BomSummaryView {
                component_count: forest.component_count(),
                cycle_count: forest.cycle_count(),
                anomaly_count: forest.anomalies().len(),
            },
            roots,
            anomalies: forest.anomalies().iter().map(|a| a.to_string()).collect(),
        }
    }

    fn build_node(node: &TreeNode, parent: Option<&ComponentRow>, lookups: &LookupTables) -> NodeView {
        let (kind, own_row) = match &node.data {
            NodeData::Component(row) => (
                NodeViewKind::Component(ComponentView {
                    row: row.clone(),
                    locks: Self::build_locks(row, parent),
                }),
                Some(row),
            ),
            NodeData::Cycle(step) => (NodeViewKind::Cycle(Self::build_cycle(step, lookups)), None),
        };

        NodeView {
            id: node.id.clone(),
            level: node.level,
            kind,
            children: node
                .children
                .iter()
                .map(|child| Self::build_node(child, own_row, lookups))
                .collect(),
        }
    }

    fn build_locks(row: &ComponentRow, parent: Option<&ComponentRow>) -> LockView {
        let locked = |operation| LockEvaluator::is_locked(row, operation, parent);
        LockView {
            modify: locked(Operation::Modify),
            replace: locked(Operation::Replace),
            add_under: locked(Operation::AddUnder),
            add_sibling: locked(Operation::AddSibling),
            delete: locked(Operation::Delete),
        }
    }

    fn build_cycle(step: &RoutingRow, lookups: &LookupTables) -> CycleView {
        CycleView {
            row: step.clone(),
            operation_description: step
                .operation
                .as_deref()
                .and_then(|code| lookups.operation(code))
                .map(String::from),
            work_center_description: step
                .work_center
                .as_deref()
                .and_then(|code| lookups.work_center(code))
                .map(String::from),
            processing: step.processing().to_string(),
            setup: step.setup().to_string(),
        }
    }
}
