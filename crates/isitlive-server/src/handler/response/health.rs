use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness of the API process itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Health {
    /// Always `ok` when the process can answer.
    pub status: String,
    /// Server time when the response was built.
    pub ts: Timestamp,
}

impl Health {
    /// Returns an `ok` health stamped with the current time.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
            ts: Timestamp::now(),
        }
    }
}
