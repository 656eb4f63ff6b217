//! Monitor request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::service::NewMonitorRecord;

/// Request payload for registering a monitor.
///
/// Unknown fields, including any client-supplied `id`, are ignored.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMonitor {
    /// Display name (1-200 characters, not blank).
    #[validate(length(min = 1, max = 200), custom(function = "validate_required_text"))]
    pub name: String,
    /// Target URL (1-1000 characters, not blank). Not parsed.
    #[validate(length(min = 1, max = 1000), custom(function = "validate_required_text"))]
    pub url: String,
    /// Initial status (max 32 characters). Missing or blank means `UNKNOWN`.
    #[validate(length(max = 32), custom(function = "validate_storable_text"))]
    pub status: Option<String>,
}

impl CreateMonitor {
    /// Converts this request into a [`NewMonitorRecord`].
    #[inline]
    pub fn into_record(self) -> NewMonitorRecord {
        NewMonitorRecord {
            name: self.name,
            url: self.url,
            status: self.status,
        }
    }
}

/// Rejects NUL characters, which PostgreSQL cannot store in text columns.
fn validate_storable_text(text: &str) -> Result<(), ValidationError> {
    if text.contains('\0') {
        return Err(ValidationError::new("contains_nul")
            .with_message("must not contain NUL characters".into()));
    }
    Ok(())
}

/// Storable text that is not whitespace only.
fn validate_required_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    validate_storable_text(text)
}
