use crate::bom_structure::domain::{ComponentRow, ErpFlags, RawComponentRow};
use std::collections::HashSet;

/// Prefix of identifiers synthesized for rows without any item identity
const PLACEHOLDER_PREFIX: &str = "unidentified";

/// RowNormalizer service filling in missing identity fields
///
/// Produces one canonical [`ComponentRow`] per raw row so tree construction
/// always has a `ComponentId`, `Line`, `Level` and `Path` to work with.
/// The input is only borrowed; callers keep their original rows.
pub struct RowNormalizer;

impl RowNormalizer {
    /// Normalizes a flat component list
    ///
    /// Defaults:
    /// - `ComponentId` falls back to `ItemId`, then to a placeholder unique within the call
    /// - `Level` is 0 for the first row and 1 for the others
    /// - `Line` is the array index
    /// - `Path` is derived from the nearest prior row one level up, or the id alone
    pub fn normalize(raw_rows: &[RawComponentRow]) -> Vec<ComponentRow> {
        let mut taken_ids: HashSet<String> = raw_rows
            .iter()
            .filter_map(|r| r.component_id.clone().or_else(|| r.item_id.clone()))
            .collect();

        let mut rows: Vec<ComponentRow> = Vec::with_capacity(raw_rows.len());
        for (index, raw) in raw_rows.iter().enumerate() {
            let component_id = match raw.component_id.as_ref().or(raw.item_id.as_ref()) {
                Some(id) => id.clone(),
                None => Self::placeholder_id(index, &mut taken_ids),
            };

            let level = raw.level.unwrap_or(if index == 0 { 0 } else { 1 });
            let line = raw.line.unwrap_or(index as i64);
            let path = match &raw.path {
                Some(path) => path.clone(),
                None => Self::infer_path(&rows, &component_id, level),
            };

            let code = raw
                .component_code
                .clone()
                .or_else(|| raw.component.clone())
                .unwrap_or_else(|| component_id.clone());
            let description = raw
                .component_description
                .clone()
                .or_else(|| raw.description.clone());

            rows.push(ComponentRow {
                component_id,
                item_id: raw.item_id.clone(),
                line,
                level,
                path,
                bom_id: raw.bom_id.clone(),
                bom_id_inherited: false,
                quantity: raw.quantity,
                uom: raw.uom.clone(),
                component_type: raw
                    .component_type
                    .as_deref()
                    .unwrap_or_default()
                    .parse()
                    .unwrap_or_default(),
                nature: raw
                    .nature
                    .as_deref()
                    .unwrap_or_default()
                    .parse()
                    .unwrap_or_default(),
                code,
                description,
                erp: ErpFlags {
                    component: raw.stato_erp.into(),
                    bom: raw.bom_stato_erp.into(),
                    parent_bom: raw.parent_bom_stato_erp.into(),
                },
            });
        }

        rows
    }

    fn placeholder_id(index: usize, taken_ids: &mut HashSet<String>) -> String {
        let mut candidate = format!("{}-{}", PLACEHOLDER_PREFIX, index);
        let mut attempt = 1;
        while taken_ids.contains(&candidate) {
            attempt += 1;
            candidate = format!("{}-{}-{}", PLACEHOLDER_PREFIX, index, attempt);
        }
        taken_ids.insert(candidate.clone());
        candidate
    }

    /// Path for a row that arrived without one
    ///
    /// Rows that claim a deep level but have no preceding row one level up
    /// become effective roots; that is accepted, not an error.
    fn infer_path(previous: &[ComponentRow], component_id: &str, level: i64) -> String {
        if level <= 1 {
            return component_id.to_string();
        }

        previous
            .iter()
            .rev()
            .find(|row| row.level == level - 1)
            .map(|parent| format!("{}.{}", parent.path, component_id))
            .unwrap_or_else(|| component_id.to_string())
    }
}
