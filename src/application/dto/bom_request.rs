/// How much of the structure to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// The BOM's own lines only (`GET_BOM_FULL`)
    Full,
    /// Every nested BOM down to `max_level` (`GET_BOM_MULTILEVEL`)
    Multilevel { max_level: u32 },
}

/// BomRequest - identifies the BOM version an editor session shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomRequest {
    /// BOM document id; empty accepts whatever a snapshot file holds
    pub bom_id: String,
    pub version: Option<String>,
    pub mode: LoadMode,
}

impl BomRequest {
    pub fn new(bom_id: impl Into<String>, version: Option<String>, mode: LoadMode) -> Self {
        Self {
            bom_id: bom_id.into(),
            version,
            mode,
        }
    }
}
