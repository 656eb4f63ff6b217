//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust
//! use isitlive_server::handler::openapi_routes;
//! use isitlive_server::middleware::OpenApiConfig;
//! use isitlive_server::service::ServiceState;
//!
//! let app: axum::Router =
//!     openapi_routes(OpenApiConfig::default()).with_state(ServiceState::in_memory());
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod health;
mod monitors;
mod request;
mod response;

use aide::axum::ApiRouter;
use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{CreateMonitor, MonitorPathParams};
pub use crate::handler::response::{Created, ErrorResponse, Health, Monitor, Monitors};
use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
use crate::service::ServiceState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with every documented route.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(health::routes())
        .merge(monitors::routes())
}

/// Returns the full application [`Router`]: API routes, the OpenAPI
/// document, the docs UI, and a JSON `not_found` fallback.
pub fn openapi_routes(open_api: OpenApiConfig) -> Router<ServiceState> {
    routes().with_open_api(open_api).fallback(not_found)
}
