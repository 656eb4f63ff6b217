//! Response types for HTTP handlers.

mod created;
mod errors;
mod health;
mod monitors;

pub use created::*;
pub use errors::*;
pub use health::*;
pub use monitors::*;
