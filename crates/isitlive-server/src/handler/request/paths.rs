//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::MonitorId;

/// Path parameters for single-monitor operations.
///
/// The id is kept as text: a segment that is neither a sequence number nor a
/// UUID names a monitor that cannot exist, which is a 404 rather than a 400.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorPathParams {
    /// Identifier of the monitor, a sequence number or a UUID.
    pub monitor_id: String,
}

impl MonitorPathParams {
    /// Parses the id segment, returning `None` if no store could have issued it.
    pub fn parse_id(&self) -> Option<MonitorId> {
        self.monitor_id.parse().ok()
    }
}
