use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to monitors created without one.
pub const DEFAULT_STATUS: &str = "UNKNOWN";

/// Identifier assigned by a [`MonitorStore`].
///
/// The in-memory store issues sequence numbers and PostgreSQL issues UUIDs.
/// Serialized untagged, as a JSON number or a hyphenated string.
///
/// [`MonitorStore`]: super::MonitorStore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MonitorId {
    Sequence(u64),
    Uuid(Uuid),
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(sequence) => write!(f, "{sequence}"),
            Self::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
        }
    }
}

impl From<u64> for MonitorId {
    #[inline]
    fn from(sequence: u64) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<Uuid> for MonitorId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

/// A path segment that is neither a sequence number nor a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid monitor id: {0:?}")]
pub struct ParseMonitorIdError(String);

impl FromStr for MonitorId {
    type Err = ParseMonitorIdError;

    /// Accepts only the forms [`Display`] produces: a decimal without
    /// leading zeros, or a lowercase hyphenated UUID.
    ///
    /// [`Display`]: fmt::Display
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonitorIdError(s.to_owned());

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(invalid());
            }
            return s.parse::<u64>().map(Self::Sequence).map_err(|_| invalid());
        }

        let uuid = Uuid::try_parse(s).map_err(|_| invalid())?;
        let mut buffer = Uuid::encode_buffer();
        if &*uuid.hyphenated().encode_lower(&mut buffer) != s {
            return Err(invalid());
        }

        Ok(Self::Uuid(uuid))
    }
}

/// A stored monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRecord {
    pub id: MonitorId,
    pub name: String,
    pub url: String,
    pub status: String,
    pub last_checked_utc: Option<Timestamp>,
}

/// Input to [`MonitorStore::create`]. The store assigns the id.
///
/// [`MonitorStore::create`]: super::MonitorStore::create
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewMonitorRecord {
    pub name: String,
    pub url: String,
    pub status: Option<String>,
}

impl NewMonitorRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the given status, or `None` when it is missing or blank.
    pub(crate) fn explicit_status(&self) -> Option<&str> {
        self.status.as_deref().filter(|status| !status.trim().is_empty())
    }

    /// Returns the status to store, falling back to [`DEFAULT_STATUS`].
    pub(crate) fn resolved_status(&self) -> String {
        self.explicit_status().unwrap_or(DEFAULT_STATUS).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sequence_and_uuid() {
        assert_eq!("42".parse::<MonitorId>(), Ok(MonitorId::Sequence(42)));

        let uuid = Uuid::now_v7();
        let parsed: MonitorId = uuid.hyphenated().to_string().parse().unwrap();
        assert_eq!(parsed, MonitorId::Uuid(uuid));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<MonitorId>().is_err());
        assert!("abc".parse::<MonitorId>().is_err());
        assert!("-1".parse::<MonitorId>().is_err());
        assert!("12ab".parse::<MonitorId>().is_err());
    }

    #[test]
    fn rejects_non_canonical_forms() {
        assert_eq!("0".parse::<MonitorId>(), Ok(MonitorId::Sequence(0)));
        assert!("001".parse::<MonitorId>().is_err());
        assert!("01".parse::<MonitorId>().is_err());
        assert!("99999999999999999999999".parse::<MonitorId>().is_err());

        let uuid = Uuid::now_v7();
        let simple = uuid.simple().to_string();
        let upper = uuid.hyphenated().to_string().to_uppercase();
        let braced = uuid.braced().to_string();
        assert!(simple.parse::<MonitorId>().is_err());
        assert!(upper.parse::<MonitorId>().is_err());
        assert!(braced.parse::<MonitorId>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let sequence = MonitorId::Sequence(7);
        assert_eq!(sequence.to_string(), "7");

        let uuid = MonitorId::Uuid(Uuid::nil());
        assert_eq!(uuid.to_string(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(uuid.to_string().parse::<MonitorId>(), Ok(uuid));
    }

    #[test]
    fn serializes_untagged() {
        let sequence = serde_json::to_value(MonitorId::Sequence(3)).unwrap();
        assert_eq!(sequence, serde_json::json!(3));

        let uuid = serde_json::to_value(MonitorId::Uuid(Uuid::nil())).unwrap();
        assert_eq!(uuid, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn blank_status_resolves_to_default() {
        let monitor = NewMonitorRecord::new("Api", "https://example.com");
        assert_eq!(monitor.resolved_status(), DEFAULT_STATUS);

        let blank = monitor.clone().with_status("  ");
        assert_eq!(blank.explicit_status(), None);
        assert_eq!(blank.resolved_status(), DEFAULT_STATUS);

        let up = monitor.with_status("UP");
        assert_eq!(up.resolved_status(), "UP");
    }
}
