use super::flex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tri-state ERP ownership flag as sent by the backend (`1`, `0` or `null`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum ErpStatus {
    /// Sourced from the ERP system, read-only here
    Erp,
    /// Owned by the local projects database
    Local,
    #[default]
    Unknown,
}

impl ErpStatus {
    pub fn is_erp(self) -> bool {
        matches!(self, ErpStatus::Erp)
    }
}

impl From<Option<i64>> for ErpStatus {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(1) => ErpStatus::Erp,
            Some(_) => ErpStatus::Local,
            None => ErpStatus::Unknown,
        }
    }
}

impl From<ErpStatus> for Option<i64> {
    fn from(value: ErpStatus) -> Self {
        match value {
            ErpStatus::Erp => Some(1),
            ErpStatus::Local => Some(0),
            ErpStatus::Unknown => None,
        }
    }
}

/// Kind of a BOM line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    #[default]
    Article,
    /// Expanded inline by the backend in multilevel reads
    Phantom,
    /// Free-text line, never owns children
    Note,
    Other(String),
}

impl ComponentType {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentType::Article => "article",
            ComponentType::Phantom => "phantom",
            ComponentType::Note => "note",
            ComponentType::Other(raw) => raw,
        }
    }
}

impl FromStr for ComponentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "" | "article" | "item" | "articolo" => ComponentType::Article,
            "phantom" | "fantasma" => ComponentType::Phantom,
            "note" | "nota" => ComponentType::Note,
            _ => ComponentType::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Production nature of the component item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Nature {
    SemiFinished,
    Finished,
    /// Bought from a supplier; a leaf by business rule
    Purchased,
    #[default]
    Unspecified,
    Other(String),
}

impl Nature {
    pub fn as_str(&self) -> &str {
        match self {
            Nature::SemiFinished => "semi-finished",
            Nature::Finished => "finished",
            Nature::Purchased => "purchased",
            Nature::Unspecified => "",
            Nature::Other(raw) => raw,
        }
    }
}

impl FromStr for Nature {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        Ok(match folded.as_str() {
            "" => Nature::Unspecified,
            "semifinished" | "semilavorato" => Nature::SemiFinished,
            "finished" | "finito" | "prodottofinito" => Nature::Finished,
            "purchased" | "acquisto" | "acquistato" => Nature::Purchased,
            _ => Nature::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ERP ownership of a row, its own nested BOM, and the BOM listing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErpFlags {
    #[serde(rename = "stato_erp")]
    pub component: ErpStatus,
    #[serde(rename = "bomStato_erp")]
    pub bom: ErpStatus,
    #[serde(rename = "parentBOMStato_erp")]
    pub parent_bom: ErpStatus,
}

/// Component row exactly as the backend sends it
///
/// Every field is optional and several have legacy aliases; the
/// [`RowNormalizer`](crate::bom_structure::services::RowNormalizer) turns
/// these into [`ComponentRow`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComponentRow {
    #[serde(rename = "ComponentId", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(rename = "ItemId", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "Line", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(rename = "Level", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(rename = "Path", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "BOMId", alias = "BomId", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub bom_id: Option<String>,
    #[serde(rename = "Quantity", alias = "Qty", default, deserialize_with = "flex::opt_f64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(rename = "UoM", alias = "UM", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(rename = "ComponentType", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(rename = "Nature", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,
    #[serde(rename = "ComponentCode", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,
    #[serde(rename = "Component", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(rename = "ComponentDescription", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component_description: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "stato_erp", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub stato_erp: Option<i64>,
    #[serde(rename = "bomStato_erp", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub bom_stato_erp: Option<i64>,
    #[serde(rename = "parentBOMStato_erp", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub parent_bom_stato_erp: Option<i64>,
}

/// Canonical component row consumed by the tree builder and policies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRow {
    #[serde(rename = "ComponentId")]
    pub component_id: String,
    #[serde(rename = "ItemId", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "Line")]
    pub line: i64,
    #[serde(rename = "Level")]
    pub level: i64,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "BOMId", skip_serializing_if = "Option::is_none")]
    pub bom_id: Option<String>,
    /// Set by the tree builder when `bom_id` was copied from the parent
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bom_id_inherited: bool,
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(rename = "UoM", skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(rename = "ComponentType", serialize_with = "serialize_display")]
    pub component_type: ComponentType,
    #[serde(rename = "Nature", serialize_with = "serialize_display")]
    pub nature: Nature,
    #[serde(rename = "ComponentCode")]
    pub code: String,
    #[serde(rename = "ComponentDescription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub erp: ErpFlags,
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl ComponentRow {
    /// Levels 0 and 1 both denote the top of the displayed BOM
    pub fn is_root_level(&self) -> bool {
        is_root_level(self.level)
    }

    /// Identity used when matching routing rows: `ItemId` when known, else `ComponentId`
    pub fn identity_matches(&self, other: &str) -> bool {
        self.component_id == other || self.item_id.as_deref() == Some(other)
    }

    /// Purchased items and notes can never own children
    pub fn accepts_children(&self) -> bool {
        self.nature != Nature::Purchased && self.component_type != ComponentType::Note
    }

    /// Path of the parent edge, `None` for single-segment paths
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('.').map(|(parent, _)| parent)
    }
}

/// Shared definition of "root level" for rows, nodes and drop targets
pub fn is_root_level(level: i64) -> bool {
    level == 0 || level == 1
}

impl From<&ComponentRow> for RawComponentRow {
    fn from(row: &ComponentRow) -> Self {
        Self {
            component_id: Some(row.component_id.clone()),
            item_id: row.item_id.clone(),
            line: Some(row.line),
            level: Some(row.level),
            path: Some(row.path.clone()),
            bom_id: row.bom_id.clone(),
            quantity: row.quantity,
            uom: row.uom.clone(),
            component_type: Some(row.component_type.to_string()),
            nature: Some(row.nature.to_string()).filter(|n| !n.is_empty()),
            component_code: Some(row.code.clone()),
            component: None,
            component_description: row.description.clone(),
            description: None,
            stato_erp: row.erp.component.into(),
            bom_stato_erp: row.erp.bom.into(),
            parent_bom_stato_erp: row.erp.parent_bom.into(),
        }
    }
}
