//! `bom-explorer.config.yml` loading
//!
//! Settings found here sit between the built-in defaults and the command
//! line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bom-explorer.config.yml";

/// Settings accepted in the config file; every key is optional
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_level: Option<u32>,
    pub format: Option<String>,
    pub version: Option<String>,
    /// Keys we do not recognise, reported once on load
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Reads and validates the config at `path`; a missing file is an error here.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Pass an existing file to --config or drop the flag to use auto-discovery.",
            path.display()
        )
    })?;

    // An empty file deserializes to `null`
    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Looks for [`CONFIG_FILENAME`] in `dir`, yielding `None` when there is none.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.api_base_url {
        if url.trim().is_empty() {
            bail!(
                "Invalid config: api_base_url must not be empty.\n\n\
                 💡 Hint: Remove the key or set it to the BOM service root (e.g., \"https://erp.example.com/api\")."
            );
        }
    }

    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Use a value such as 30."
        );
    }

    if let Some(ref format) = config.format {
        if format.parse::<crate::application::dto::OutputFormat>().is_err() {
            bail!(
                "Invalid config: unknown format '{}'.\n\n\
                 💡 Hint: Supported formats are 'tree' and 'json'.",
                format
            );
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' (ignored).",
            key
        );
    }
}
