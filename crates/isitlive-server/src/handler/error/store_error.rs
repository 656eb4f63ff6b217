//! Monitor store failures to HTTP errors.

use crate::handler::{Error, ErrorKind};
use crate::service::StoreError;
use crate::utility::tracing_targets::TRACING_TARGET_STORE;

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Unavailable(source) => {
                tracing::error!(
                    target: TRACING_TARGET_STORE,
                    error = %source,
                    "monitor store unavailable"
                );
                ErrorKind::ServiceUnavailable
                    .with_context(source.to_string())
                    .with_resource("monitor")
            }
            StoreError::Backend(source) => {
                tracing::error!(
                    target: TRACING_TARGET_STORE,
                    error = %source,
                    "monitor store failure"
                );
                ErrorKind::InternalServerError
                    .with_context(source.to_string())
                    .with_resource("monitor")
            }
        }
    }
}
