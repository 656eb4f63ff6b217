use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::{MonitorId, MonitorRecord};

/// A registered monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Identifier assigned by the store.
    pub id: MonitorId,
    /// Display name.
    pub name: String,
    /// Target URL, stored as given.
    pub url: String,
    /// Last known liveness status.
    pub status: String,
    /// When the monitor was last checked, if ever.
    pub last_checked_utc: Option<Timestamp>,
}

impl Monitor {
    /// Returns the path this monitor can be fetched from.
    pub fn location(&self) -> String {
        format!("/monitors/{}", self.id)
    }
}

impl From<MonitorRecord> for Monitor {
    fn from(record: MonitorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            url: record.url,
            status: record.status,
            last_checked_utc: record.last_checked_utc,
        }
    }
}

/// Monitors ordered by name.
pub type Monitors = Vec<Monitor>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() -> anyhow::Result<()> {
        let monitor = Monitor {
            id: MonitorId::Sequence(7),
            name: "Api".into(),
            url: "https://api.example.com".into(),
            status: "UP".into(),
            last_checked_utc: None,
        };

        let json = serde_json::to_value(&monitor)?;
        assert_eq!(json["id"], 7);
        assert_eq!(json["status"], "UP");
        assert!(json["lastCheckedUtc"].is_null());
        assert_eq!(monitor.location(), "/monitors/7");

        Ok(())
    }
}
