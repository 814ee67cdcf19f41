use super::LockEvaluator;
use crate::bom_structure::domain::{
    BomForest, ComponentChanges, ComponentRow, ComponentSource, ComponentType, DropMode,
    LineAssignment, MutationIntent, Nature, NodeId, Operation, RoutingStepDraft, TreeNode,
};
use crate::bom_structure::services::ResolvedDrop;
use thiserror::Error;

/// Spacing used when renumbering reordered component lines
pub const LINE_STEP: i64 = 10;

/// Reason a mutation was refused before reaching the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Node '{node}' not found in the current BOM")]
    UnknownNode { node: NodeId },

    #[error("Node '{node}' is a routing step, not a component")]
    NotAComponent { node: NodeId },

    #[error("Node '{node}' is not a routing step")]
    NotACycle { node: NodeId },

    #[error("Operation '{operation}' on '{node}' is not allowed: the BOM comes from the ERP and is read-only")]
    Locked { node: NodeId, operation: Operation },

    #[error("Component '{node}' is {reason} and cannot have child components")]
    LeafComponent { node: NodeId, reason: &'static str },

    #[error("Component '{node}' has no BOM to hold routing steps")]
    MissingBomId { node: NodeId },

    #[error("Nodes to reorder must share the same parent ('{node}' does not)")]
    NotSiblings { node: NodeId },

    #[error("A temporary component needs a description")]
    EmptyDescription,
}

/// MutationPlanner policy turning user intent into a backend mutation
///
/// Every plan is checked against the lock rules and the leaf rules first;
/// a refused plan never produces an intent.
pub struct MutationPlanner<'a> {
    forest: &'a BomForest,
    displayed_bom: Option<&'a str>,
}

impl<'a> MutationPlanner<'a> {
    /// `displayed_bom` is the BOM shown at the top of the view; root rows belong to it
    pub fn new(forest: &'a BomForest, displayed_bom: Option<&'a str>) -> Self {
        Self {
            forest,
            displayed_bom,
        }
    }

    pub fn plan_drop(&self, drop: &ResolvedDrop) -> Result<MutationIntent, PolicyViolation> {
        let target = self.component(&drop.target)?;
        self.ensure_unlocked(&drop.target, drop.mode.operation())?;
        if let ComponentSource::Temporary { description, .. } = &drop.payload {
            if description.trim().is_empty() {
                return Err(PolicyViolation::EmptyDescription);
            }
        }

        match drop.mode {
            DropMode::Replace => Ok(self.replace_intent(&drop.target, target, &drop.payload)),
            DropMode::AddUnder => {
                Self::ensure_accepts_children(&drop.target, target)?;
                Ok(MutationIntent::AddComponent {
                    bom_id: Self::own_bom(target),
                    parent_component_id: Some(target.component_id.clone()),
                    after_line: None,
                    source: drop.payload.clone(),
                })
            }
            DropMode::AddSibling => {
                Self::ensure_accepts_children(&drop.target, target)?;
                let parent = self.parent_component(&drop.target);
                Ok(MutationIntent::AddComponent {
                    bom_id: self.containing_bom(&drop.target),
                    parent_component_id: parent.map(|p| p.component_id.clone()),
                    after_line: Some(target.line),
                    source: drop.payload.clone(),
                })
            }
        }
    }

    pub fn plan_update(
        &self,
        node: &NodeId,
        changes: ComponentChanges,
    ) -> Result<MutationIntent, PolicyViolation> {
        let row = self.component(node)?;
        self.ensure_unlocked(node, Operation::Modify)?;
        Ok(MutationIntent::UpdateComponent {
            bom_id: self.containing_bom(node),
            component_id: row.component_id.clone(),
            line: row.line,
            changes,
        })
    }

    pub fn plan_delete(&self, node: &NodeId) -> Result<MutationIntent, PolicyViolation> {
        let row = self.component(node)?;
        self.ensure_unlocked(node, Operation::Delete)?;
        Ok(MutationIntent::DeleteComponent {
            bom_id: self.containing_bom(node),
            component_id: row.component_id.clone(),
            line: row.line,
        })
    }

    /// Renumbers `ordered` siblings to lines 10, 20, 30, ...
    pub fn plan_reorder_components(
        &self,
        ordered: &[NodeId],
    ) -> Result<MutationIntent, PolicyViolation> {
        let mut parent: Option<Option<&NodeId>> = None;
        let mut lines = Vec::with_capacity(ordered.len());

        for (position, node) in ordered.iter().enumerate() {
            let row = self.component(node)?;
            let node_parent = self.forest.parent_of(node).map(|p| &p.id);
            match parent {
                None => parent = Some(node_parent),
                Some(expected) if expected != node_parent => {
                    return Err(PolicyViolation::NotSiblings { node: node.clone() });
                }
                Some(_) => {}
            }
            self.ensure_unlocked(node, Operation::Modify)?;
            lines.push(LineAssignment {
                component_id: row.component_id.clone(),
                line: (position as i64 + 1) * LINE_STEP,
            });
        }

        let bom_id = ordered
            .first()
            .and_then(|first| self.containing_bom(first));
        Ok(MutationIntent::ReorderComponents { bom_id, lines })
    }

    pub fn plan_add_routing_step(
        &self,
        owner: &NodeId,
        step: RoutingStepDraft,
    ) -> Result<MutationIntent, PolicyViolation> {
        let bom_id = self.routing_bom(owner)?;
        Ok(MutationIntent::AddRoutingStep { bom_id, step })
    }

    pub fn plan_update_routing_step(
        &self,
        cycle: &NodeId,
        step: RoutingStepDraft,
    ) -> Result<MutationIntent, PolicyViolation> {
        let (bom_id, rtg_step) = self.cycle_step(cycle)?;
        Ok(MutationIntent::UpdateRoutingStep {
            bom_id,
            rtg_step,
            step,
        })
    }

    pub fn plan_delete_routing_step(&self, cycle: &NodeId) -> Result<MutationIntent, PolicyViolation> {
        let (bom_id, rtg_step) = self.cycle_step(cycle)?;
        Ok(MutationIntent::DeleteRoutingStep { bom_id, rtg_step })
    }

    /// `ordered` lists the owner's cycle nodes in their new order
    pub fn plan_reorder_routing_steps(
        &self,
        owner: &NodeId,
        ordered: &[NodeId],
    ) -> Result<MutationIntent, PolicyViolation> {
        let bom_id = self.routing_bom(owner)?;
        let steps = ordered
            .iter()
            .map(|cycle| {
                if self.forest.parent_of(cycle).map(|p| &p.id) != Some(owner) {
                    return Err(PolicyViolation::NotSiblings { node: cycle.clone() });
                }
                self.cycle_step(cycle).map(|(_, step)| step)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MutationIntent::ReorderRoutingSteps { bom_id, steps })
    }

    fn node(&self, id: &NodeId) -> Result<&'a TreeNode, PolicyViolation> {
        self.forest
            .find(id)
            .ok_or_else(|| PolicyViolation::UnknownNode { node: id.clone() })
    }

    fn component(&self, id: &NodeId) -> Result<&'a ComponentRow, PolicyViolation> {
        self.node(id)?
            .component()
            .ok_or_else(|| PolicyViolation::NotAComponent { node: id.clone() })
    }

    fn parent_component(&self, id: &NodeId) -> Option<&'a ComponentRow> {
        self.forest.parent_of(id).and_then(|p| p.component())
    }

    /// BOM document listing the node's line
    fn containing_bom(&self, id: &NodeId) -> Option<String> {
        match self.parent_component(id) {
            Some(parent) => parent.bom_id.clone(),
            None => self.displayed_bom.map(String::from),
        }
    }

    fn ensure_unlocked(&self, id: &NodeId, operation: Operation) -> Result<(), PolicyViolation> {
        match LockEvaluator::is_node_locked(self.forest, id, operation) {
            Some(true) => Err(PolicyViolation::Locked {
                node: id.clone(),
                operation,
            }),
            Some(false) => Ok(()),
            None => Err(PolicyViolation::UnknownNode { node: id.clone() }),
        }
    }

    fn ensure_accepts_children(id: &NodeId, row: &ComponentRow) -> Result<(), PolicyViolation> {
        if row.nature == Nature::Purchased {
            return Err(PolicyViolation::LeafComponent {
                node: id.clone(),
                reason: "purchased",
            });
        }
        if row.component_type == ComponentType::Note {
            return Err(PolicyViolation::LeafComponent {
                node: id.clone(),
                reason: "a note",
            });
        }
        Ok(())
    }

    fn replace_intent(&self, id: &NodeId, row: &ComponentRow, payload: &ComponentSource) -> MutationIntent {
        let bom_id = self.containing_bom(id);
        match payload {
            ComponentSource::Existing { item_id, quantity } => {
                MutationIntent::ReplaceComponentWithExisting {
                    bom_id,
                    component_id: row.component_id.clone(),
                    line: row.line,
                    item_id: item_id.clone(),
                    quantity: quantity.or(row.quantity),
                }
            }
            ComponentSource::Temporary {
                description,
                quantity,
                uom,
            } => MutationIntent::ReplaceComponentWithNewTemporaryCode {
                bom_id,
                component_id: row.component_id.clone(),
                line: row.line,
                description: description.trim().to_string(),
                quantity: quantity.or(row.quantity),
                uom: uom.clone().or_else(|| row.uom.clone()),
            },
        }
    }

    /// BOM carried by the row itself; an inherited one belongs to an ancestor
    fn own_bom(row: &ComponentRow) -> Option<String> {
        row.bom_id.clone().filter(|_| !row.bom_id_inherited)
    }

    /// Owner's own BOM, after checking the owner may be modified
    fn routing_bom(&self, owner: &NodeId) -> Result<String, PolicyViolation> {
        let row = self.component(owner)?;
        self.ensure_unlocked(owner, Operation::Modify)?;
        Self::own_bom(row).ok_or_else(|| PolicyViolation::MissingBomId { node: owner.clone() })
    }

    fn cycle_step(&self, cycle: &NodeId) -> Result<(String, i64), PolicyViolation> {
        let step = self
            .node(cycle)?
            .cycle()
            .ok_or_else(|| PolicyViolation::NotACycle { node: cycle.clone() })?;
        let owner = self
            .forest
            .parent_of(cycle)
            .map(|p| p.id.clone())
            .ok_or_else(|| PolicyViolation::UnknownNode { node: cycle.clone() })?;
        let bom_id = self.routing_bom(&owner)?;
        Ok((step.bom_id.clone().unwrap_or(bom_id), step.step()))
    }
}
