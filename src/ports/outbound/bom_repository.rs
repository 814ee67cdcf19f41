use crate::bom_structure::domain::{BomSnapshot, MutationIntent};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend answer to a dispatched mutation
///
/// `success: false` is a normal, user-visible outcome; transport problems
/// are reported through the `Err` side of [`BomRepository::dispatch`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Any other field sent back (new temporary codes, new line numbers, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: Some(msg.into()),
            extra: Map::new(),
        }
    }
}

/// BomRepository port for reading and changing BOMs
///
/// This port abstracts the BOM backend (REST API, snapshot file, ...).
///
/// # Async Support
/// Implementations must be `Send + Sync`, like every async port of the crate.
#[async_trait]
pub trait BomRepository: Send + Sync {
    /// Fetches a single BOM version: header, its own component lines and routing
    ///
    /// # Errors
    /// Returns an error if the backend cannot be reached or the payload is malformed
    async fn fetch_bom_full(&self, bom_id: &str, version: Option<&str>) -> Result<BomSnapshot>;

    /// Fetches the flattened structure of all nested BOMs down to `max_level`
    ///
    /// Phantom components arrive already expanded inline.
    async fn fetch_bom_multilevel(
        &self,
        bom_id: &str,
        version: Option<&str>,
        max_level: u32,
    ) -> Result<BomSnapshot>;

    /// Sends one mutation intent to the backend
    async fn dispatch(&self, intent: &MutationIntent) -> Result<MutationResponse>;
}
