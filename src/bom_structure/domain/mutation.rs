use serde::{Deserialize, Serialize};

/// Where a new or replacing component comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComponentSource {
    /// An article already known to the item master
    #[serde(rename_all = "camelCase")]
    Existing {
        item_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<f64>,
    },
    /// A new article; the backend generates its temporary code
    #[serde(rename_all = "camelCase")]
    Temporary {
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uom: Option<String>,
    },
}

/// Editable fields of an existing component line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Routing step fields sent on add/update; times in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingStepDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtg_step: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAssignment {
    pub component_id: String,
    pub line: i64,
}

/// A change request dispatched to the BOM backend
///
/// `bom_id` always names the BOM document whose lines change: the
/// containing BOM for replace/update/delete, the new parent's BOM for adds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum MutationIntent {
    AddComponent {
        bom_id: Option<String>,
        parent_component_id: Option<String>,
        after_line: Option<i64>,
        source: ComponentSource,
    },
    UpdateComponent {
        bom_id: Option<String>,
        component_id: String,
        line: i64,
        changes: ComponentChanges,
    },
    DeleteComponent {
        bom_id: Option<String>,
        component_id: String,
        line: i64,
    },
    ReplaceComponentWithExisting {
        bom_id: Option<String>,
        component_id: String,
        line: i64,
        item_id: String,
        quantity: Option<f64>,
    },
    ReplaceComponentWithNewTemporaryCode {
        bom_id: Option<String>,
        component_id: String,
        line: i64,
        description: String,
        quantity: Option<f64>,
        uom: Option<String>,
    },
    AddRoutingStep {
        bom_id: String,
        step: RoutingStepDraft,
    },
    UpdateRoutingStep {
        bom_id: String,
        rtg_step: i64,
        step: RoutingStepDraft,
    },
    DeleteRoutingStep {
        bom_id: String,
        rtg_step: i64,
    },
    ReorderRoutingSteps {
        bom_id: String,
        steps: Vec<i64>,
    },
    ReorderComponents {
        bom_id: Option<String>,
        lines: Vec<LineAssignment>,
    },
}

impl MutationIntent {
    /// Kebab-case action name, as sent on the wire
    pub fn action(&self) -> &'static str {
        match self {
            MutationIntent::AddComponent { .. } => "add-component",
            MutationIntent::UpdateComponent { .. } => "update-component",
            MutationIntent::DeleteComponent { .. } => "delete-component",
            MutationIntent::ReplaceComponentWithExisting { .. } => "replace-component-with-existing",
            MutationIntent::ReplaceComponentWithNewTemporaryCode { .. } => {
                "replace-component-with-new-temporary-code"
            }
            MutationIntent::AddRoutingStep { .. } => "add-routing-step",
            MutationIntent::UpdateRoutingStep { .. } => "update-routing-step",
            MutationIntent::DeleteRoutingStep { .. } => "delete-routing-step",
            MutationIntent::ReorderRoutingSteps { .. } => "reorder-routing-steps",
            MutationIntent::ReorderComponents { .. } => "reorder-components",
        }
    }

    /// BOM document whose lines or steps change, when known
    pub fn bom_id(&self) -> Option<&str> {
        match self {
            MutationIntent::AddComponent { bom_id, .. }
            | MutationIntent::UpdateComponent { bom_id, .. }
            | MutationIntent::DeleteComponent { bom_id, .. }
            | MutationIntent::ReplaceComponentWithExisting { bom_id, .. }
            | MutationIntent::ReplaceComponentWithNewTemporaryCode { bom_id, .. }
            | MutationIntent::ReorderComponents { bom_id, .. } => bom_id.as_deref(),
            MutationIntent::AddRoutingStep { bom_id, .. }
            | MutationIntent::UpdateRoutingStep { bom_id, .. }
            | MutationIntent::DeleteRoutingStep { bom_id, .. }
            | MutationIntent::ReorderRoutingSteps { bom_id, .. } => Some(bom_id),
        }
    }
}
