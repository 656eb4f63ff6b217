//! Tracing targets used across the crate.
//!
//! Filter on these with `RUST_LOG`, for example
//! `RUST_LOG=isitlive_server::store=debug`.

/// Monitor store operations for both backends.
pub const TRACING_TARGET_STORE: &str = "isitlive_server::store";

/// Service state construction and configuration.
pub const TRACING_TARGET_SERVICE: &str = "isitlive_server::service";

/// Request extraction and validation failures.
pub const TRACING_TARGET_EXTRACT: &str = "isitlive_server::extract";

/// Error responses sent to clients.
pub const TRACING_TARGET_RESPONSE: &str = "isitlive_server::response";

/// Middleware errors such as timeouts.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "isitlive_server::recovery::error";

/// Panics caught while handling a request.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "isitlive_server::recovery::panic";

/// Per-request timing emitted by the observability middleware.
pub const TRACING_TARGET_HTTP: &str = "isitlive_server::http";
