use crate::application::read_models::BomReadModel;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    generated_at: String,
    tool: ToolInfo,
    #[serde(flatten)]
    model: &'a BomReadModel,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

/// JsonTreeFormatter adapter emitting the forest as pretty-printed JSON
///
/// Nodes keep the `{id, type, level, data, children}` shape; the document
/// also carries the header, a summary and the anomaly list.
pub struct JsonTreeFormatter;

impl JsonTreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for JsonTreeFormatter {
    fn format(&self, model: &BomReadModel) -> Result<String> {
        let document = JsonDocument {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            model,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
