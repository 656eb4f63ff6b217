//! Request extractors that reject with structured [`handler::Error`] bodies.
//!
//! - [`Json`] replaces [`axum::Json`] with descriptive rejection messages.
//! - [`ValidateJson`] deserializes and then runs [`validator::Validate`].
//! - [`Path`] replaces [`axum::extract::Path`].
//!
//! [`handler::Error`]: crate::handler::Error

pub mod reject;

pub use crate::extract::reject::{Json, Path, ValidateJson};
