use crate::bom_structure::domain::{BomSnapshot, MutationIntent};
use crate::ports::outbound::{BomRepository, MutationResponse};
use crate::shared::error::BomError;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// HttpBomRepository adapter for the BOM REST backend
///
/// Endpoints, relative to the configured base URL:
/// - `GET  /boms/{id}?version=`
/// - `GET  /boms/{id}/multilevel?version=&maxLevel=`
/// - `POST /boms/{id}/actions` (or `/boms/actions` when the intent names no BOM)
///
/// Requests are never retried: a failed call is reported and abandoned.
pub struct HttpBomRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBomRepository {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a client for `base_url`
    ///
    /// # Errors
    /// Returns [`BomError::InvalidApiUrl`] unless the URL is an absolute http(s) URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Self::validate_base_url(base_url)?;
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("bom-explorer/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn validate_base_url(url: &str) -> Result<String> {
        let trimmed = url.trim().trim_end_matches('/');
        let invalid = |reason: &str| BomError::InvalidApiUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| invalid("only http:// and https:// URLs are supported"))?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(invalid("missing host").into());
        }
        if trimmed.contains(['?', '#']) {
            return Err(invalid("query strings and fragments are not allowed").into());
        }

        Ok(trimmed.to_string())
    }

    /// Validates an identifier before it becomes a path segment
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.trim().is_empty() {
            anyhow::bail!("{} must not be empty", component_type);
        }

        // Security: Prevent URL injection attacks
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        Ok(())
    }

    fn bom_url(&self, bom_id: &str) -> Result<String> {
        Self::validate_url_component(bom_id, "BOM id")?;
        Ok(format!("{}/boms/{}", self.base_url, urlencoding::encode(bom_id)))
    }

    fn full_url(&self, bom_id: &str, version: Option<&str>) -> Result<String> {
        let mut url = self.bom_url(bom_id)?;
        if let Some(version) = version {
            url.push_str(&format!("?version={}", urlencoding::encode(version)));
        }
        Ok(url)
    }

    fn multilevel_url(&self, bom_id: &str, version: Option<&str>, max_level: u32) -> Result<String> {
        let mut url = format!("{}/multilevel?maxLevel={}", self.bom_url(bom_id)?, max_level);
        if let Some(version) = version {
            url.push_str(&format!("&version={}", urlencoding::encode(version)));
        }
        Ok(url)
    }

    fn actions_url(&self, intent: &MutationIntent) -> Result<String> {
        match intent.bom_id() {
            Some(bom_id) => Ok(format!("{}/actions", self.bom_url(bom_id)?)),
            None => Ok(format!("{}/boms/actions", self.base_url)),
        }
    }

    async fn get_snapshot(&self, url: String) -> Result<BomSnapshot> {
        let request_failed = |details: String| BomError::ApiRequestFailed {
            endpoint: url.clone(),
            details,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(request_failed(format!("HTTP status {}", response.status())).into());
        }

        let snapshot: BomSnapshot = response
            .json()
            .await
            .map_err(|e| request_failed(format!("Invalid BOM payload: {}", e)))?;
        Ok(snapshot)
    }
}

#[async_trait]
impl BomRepository for HttpBomRepository {
    async fn fetch_bom_full(&self, bom_id: &str, version: Option<&str>) -> Result<BomSnapshot> {
        let url = self.full_url(bom_id, version)?;
        self.get_snapshot(url).await
    }

    async fn fetch_bom_multilevel(
        &self,
        bom_id: &str,
        version: Option<&str>,
        max_level: u32,
    ) -> Result<BomSnapshot> {
        let url = self.multilevel_url(bom_id, version, max_level)?;
        self.get_snapshot(url).await
    }

    async fn dispatch(&self, intent: &MutationIntent) -> Result<MutationResponse> {
        let url = self.actions_url(intent)?;
        let response = self
            .client
            .post(&url)
            .json(intent)
            .send()
            .await
            .map_err(|e| BomError::ApiRequestFailed {
                endpoint: url.clone(),
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // Validation failures come back as 4xx with the usual `{success, msg}` body
        match serde_json::from_str::<MutationResponse>(&body) {
            Ok(parsed) if status.is_success() || !parsed.success => Ok(parsed),
            _ if status.is_success() => Ok(MutationResponse::ok()),
            _ => Err(BomError::ApiRequestFailed {
                endpoint: url,
                details: format!("HTTP status {}", status),
            }
            .into()),
        }
    }
}
