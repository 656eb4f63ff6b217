//! Request types for HTTP handlers.

mod monitors;
mod paths;

pub use monitors::*;
pub use paths::*;
