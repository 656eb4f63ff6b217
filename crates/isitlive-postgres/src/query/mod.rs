//! Repository traits implemented for [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

mod monitor;

pub use monitor::MonitorRepository;
