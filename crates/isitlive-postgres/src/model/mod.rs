//! Diesel models for the registry tables.

mod monitor;

pub use monitor::{Monitor, NewMonitor};
