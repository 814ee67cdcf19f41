use super::{flex, RawComponentRow, RoutingRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header of one BOM version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomHeader {
    #[serde(rename = "BOMId", alias = "BomId", default, deserialize_with = "flex::opt_key")]
    pub bom_id: Option<String>,
    #[serde(rename = "Version", default, deserialize_with = "flex::opt_key")]
    pub version: Option<String>,
    #[serde(rename = "ItemId", default, deserialize_with = "flex::opt_key")]
    pub item_id: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "bomStato_erp", default, deserialize_with = "flex::opt_i64")]
    pub bom_stato_erp: Option<i64>,
}

/// Code → description tables used to render routing steps
///
/// Passed explicitly to whoever renders cycles instead of living in
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    #[serde(default, rename = "workCenters")]
    pub work_centers: BTreeMap<String, String>,
    #[serde(default)]
    pub operations: BTreeMap<String, String>,
}

impl LookupTables {
    pub fn work_center(&self, code: &str) -> Option<&str> {
        self.work_centers.get(code).map(String::as_str)
    }

    pub fn operation(&self, code: &str) -> Option<&str> {
        self.operations.get(code).map(String::as_str)
    }
}

/// Payload of `GET_BOM_FULL` / `GET_BOM_MULTILEVEL`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomSnapshot {
    #[serde(default)]
    pub header: BomHeader,
    #[serde(default)]
    pub components: Vec<RawComponentRow>,
    #[serde(default)]
    pub routing: Vec<RoutingRow>,
    #[serde(default)]
    pub lookups: LookupTables,
}

impl BomSnapshot {
    /// Keeps only rows down to `max_level`; rows without a level are kept
    pub fn truncated_to_level(mut self, max_level: u32) -> Self {
        let max_level = i64::from(max_level);
        self.components
            .retain(|row| row.level.map_or(true, |level| level <= max_level));
        self.routing
            .retain(|row| row.level.map_or(true, |level| level <= max_level));
        self
    }
}
