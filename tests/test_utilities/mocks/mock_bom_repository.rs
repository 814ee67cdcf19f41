use async_trait::async_trait;
use bom_explorer::prelude::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock BomRepository serving one snapshot and recording dispatched intents
///
/// Responses are consumed in order; when none is queued, dispatch succeeds.
#[derive(Default, Clone)]
pub struct MockBomRepository {
    snapshot: Arc<Mutex<BomSnapshot>>,
    responses: Arc<Mutex<VecDeque<std::result::Result<MutationResponse, String>>>>,
    pub dispatched: Arc<Mutex<Vec<MutationIntent>>>,
    pub fetches: Arc<Mutex<usize>>,
}

impl MockBomRepository {
    pub fn new(snapshot: BomSnapshot) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Self {
        Self::new(serde_json::from_str(json).unwrap())
    }

    pub fn with_response(self, response: MutationResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_failure(self, error: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    /// Replaces the served snapshot, as if another user edited the BOM
    pub fn set_snapshot(&self, snapshot: BomSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn get_dispatched(&self) -> Vec<MutationIntent> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    fn serve(&self) -> BomSnapshot {
        *self.fetches.lock().unwrap() += 1;
        self.snapshot.lock().unwrap().clone()
    }
}

#[async_trait]
impl BomRepository for MockBomRepository {
    async fn fetch_bom_full(&self, _bom_id: &str, _version: Option<&str>) -> Result<BomSnapshot> {
        Ok(self.serve())
    }

    async fn fetch_bom_multilevel(
        &self,
        _bom_id: &str,
        _version: Option<&str>,
        max_level: u32,
    ) -> Result<BomSnapshot> {
        Ok(self.serve().truncated_to_level(max_level))
    }

    async fn dispatch(&self, intent: &MutationIntent) -> Result<MutationResponse> {
        self.dispatched.lock().unwrap().push(intent.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Ok(MutationResponse::ok()),
        }
    }
}
