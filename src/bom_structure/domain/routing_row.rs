use super::flex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing or setup time, stored as whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDuration(u64);

impl StepDuration {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }
}

/// `HH:MM:SS`; hours keep growing past 99 instead of wrapping
impl fmt::Display for StepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for StepDuration {
    type Err = anyhow::Error;

    /// Accepts `HH:MM:SS`, `MM:SS` or plain seconds
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let numbers = parts
            .iter()
            .map(|p| p.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| anyhow::anyhow!("Invalid duration '{}': expected HH:MM:SS", s))?;

        let secs = match numbers.as_slice() {
            [secs] => Some(*secs),
            [minutes, secs] if *secs < 60 => minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(*secs)),
            [hours, minutes, secs] if *minutes < 60 && *secs < 60 => hours
                .checked_mul(3600)
                .and_then(|h| h.checked_add(minutes * 60 + secs)),
            _ => anyhow::bail!("Invalid duration '{}': expected HH:MM:SS", s),
        };
        match secs {
            Some(secs) => Ok(Self(secs)),
            None => anyhow::bail!("Duration '{}' is out of range", s),
        }
    }
}

/// One production step of a BOM routing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingRow {
    #[serde(rename = "RtgStep", default, deserialize_with = "flex::opt_i64")]
    pub rtg_step: Option<i64>,
    #[serde(rename = "BOMId", alias = "BomId", default, deserialize_with = "flex::opt_key")]
    pub bom_id: Option<String>,
    #[serde(rename = "ItemId", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "ComponentId", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(rename = "Operation", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(rename = "WC", default, deserialize_with = "flex::opt_key", skip_serializing_if = "Option::is_none")]
    pub work_center: Option<String>,
    #[serde(rename = "ProcessingTime", default, deserialize_with = "flex::opt_seconds", skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,
    #[serde(rename = "SetupTime", default, deserialize_with = "flex::opt_seconds", skip_serializing_if = "Option::is_none")]
    pub setup_time: Option<u64>,
    #[serde(rename = "Notes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `Some(0)` marks a step of the root item itself
    #[serde(rename = "Level", default, deserialize_with = "flex::opt_i64", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
}

impl RoutingRow {
    pub fn step(&self) -> i64 {
        self.rtg_step.unwrap_or(0)
    }

    pub fn is_root_cycle(&self) -> bool {
        self.level == Some(0)
    }

    /// Component identity carried by the row, item id first
    pub fn identity(&self) -> Option<&str> {
        self.item_id.as_deref().or(self.component_id.as_deref())
    }

    pub fn processing(&self) -> StepDuration {
        StepDuration::from_secs(self.processing_time.unwrap_or(0))
    }

    pub fn setup(&self) -> StepDuration {
        StepDuration::from_secs(self.setup_time.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_display() {
        assert_eq!(StepDuration::from_secs(0).to_string(), "00:00:00");
        assert_eq!(StepDuration::from_secs(3725).to_string(), "01:02:05");
        assert_eq!(StepDuration::from_secs(360_000).to_string(), "100:00:00");
    }

    #[test]
    fn test_duration_parse_forms() {
        assert_eq!("01:02:05".parse::<StepDuration>().unwrap().as_secs(), 3725);
        assert_eq!("02:05".parse::<StepDuration>().unwrap().as_secs(), 125);
        assert_eq!("90".parse::<StepDuration>().unwrap().as_secs(), 90);
    }

    #[test]
    fn test_duration_parse_rejects_out_of_range_fields() {
        assert!("01:60:00".parse::<StepDuration>().is_err());
        assert!("aa:bb".parse::<StepDuration>().is_err());
        assert!("1:2:3:4".parse::<StepDuration>().is_err());
    }

    #[test]
    fn test_routing_row_from_json() {
        let row: RoutingRow = serde_json::from_str(
            r#"{"RtgStep": "20", "BOMId": 55, "WC": "LASER", "ProcessingTime": 90, "Level": 0}"#,
        )
        .unwrap();
        assert_eq!(row.step(), 20);
        assert_eq!(row.bom_id.as_deref(), Some("55"));
        assert!(row.is_root_cycle());
        assert_eq!(row.processing().to_string(), "00:01:30");
        assert_eq!(row.setup().as_secs(), 0);
        assert!(row.identity().is_none());
    }

    #[test]
    fn test_times_accept_clock_text() {
        let row: RoutingRow = serde_json::from_str(
            r#"{"RtgStep": 10, "ProcessingTime": "00:12:00", "SetupTime": "-5"}"#,
        )
        .unwrap();
        assert_eq!(row.processing().as_secs(), 720);
        assert!(row.setup_time.is_none());
    }

    #[test]
    fn test_oversized_clock_text_is_dropped() {
        assert!("99999999999999999:00:00".parse::<StepDuration>().is_err());
        assert!("999999999999999999999:00".parse::<StepDuration>().is_err());

        let row: RoutingRow = serde_json::from_str(
            r#"{"RtgStep": 10, "ProcessingTime": "99999999999999999:00:00", "SetupTime": "01:00:00"}"#,
        )
        .unwrap();
        assert!(row.processing_time.is_none());
        assert_eq!(row.setup().as_secs(), 3600);
    }

    #[test]
    fn test_identity_prefers_item_id() {
        let row = RoutingRow {
            item_id: Some("ITEM".to_string()),
            component_id: Some("COMP".to_string()),
            ..Default::default()
        };
        assert_eq!(row.identity(), Some("ITEM"));
    }
}
