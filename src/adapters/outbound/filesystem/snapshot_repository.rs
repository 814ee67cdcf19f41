use crate::bom_structure::domain::{BomSnapshot, MutationIntent};
use crate::ports::outbound::{BomRepository, MutationResponse};
use crate::shared::error::BomError;
use crate::shared::security::{read_regular_file, MAX_SNAPSHOT_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// SnapshotFileRepository adapter serving a BOM from a JSON export
///
/// The file has the shape of a `GET_BOM_FULL` answer. It is read on every
/// fetch so a reload picks up edits made to the file in between.
/// Snapshots are read-only: every dispatched mutation is answered with
/// `success: false`.
pub struct SnapshotFileRepository {
    path: PathBuf,
}

impl SnapshotFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the snapshot with the safe-read checks
    pub fn load(&self) -> Result<BomSnapshot> {
        if !self.path.exists() {
            return Err(BomError::SnapshotNotFound {
                path: self.path.clone(),
                suggestion: "Export the BOM with `bom-explorer show --format json`, or pass --api-url to read it from the backend".to_string(),
            }
            .into());
        }

        let content = read_regular_file(&self.path, "BOM snapshot", MAX_SNAPSHOT_SIZE).map_err(
            |e| BomError::SnapshotParseError {
                path: self.path.clone(),
                details: e.to_string(),
            },
        )?;

        serde_json::from_str(&content).map_err(|e| {
            BomError::SnapshotParseError {
                path: self.path.clone(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// An empty `bom_id` accepts whatever BOM the file holds
    fn load_matching(&self, bom_id: &str, version: Option<&str>) -> Result<BomSnapshot> {
        let snapshot = self.load()?;

        if let Some(found) = snapshot.header.bom_id.as_deref() {
            if !bom_id.is_empty() && found != bom_id {
                anyhow::bail!(
                    "Snapshot {} holds BOM '{}', not '{}'",
                    self.path.display(),
                    found,
                    bom_id
                );
            }
        }
        if let (Some(wanted), Some(found)) = (version, snapshot.header.version.as_deref()) {
            if wanted != found {
                anyhow::bail!(
                    "Snapshot {} holds version '{}', not '{}'",
                    self.path.display(),
                    found,
                    wanted
                );
            }
        }

        Ok(snapshot)
    }
}

#[async_trait]
impl BomRepository for SnapshotFileRepository {
    async fn fetch_bom_full(&self, bom_id: &str, version: Option<&str>) -> Result<BomSnapshot> {
        self.load_matching(bom_id, version)
    }

    async fn fetch_bom_multilevel(
        &self,
        bom_id: &str,
        version: Option<&str>,
        max_level: u32,
    ) -> Result<BomSnapshot> {
        Ok(self.load_matching(bom_id, version)?.truncated_to_level(max_level))
    }

    async fn dispatch(&self, intent: &MutationIntent) -> Result<MutationResponse> {
        Ok(MutationResponse::failed(format!(
            "Snapshot {} is read-only; '{}' needs the BOM API (--api-url)",
            self.path.display(),
            intent.action()
        )))
    }
}
