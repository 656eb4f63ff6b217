//! Application state, configuration and the monitor store.

mod config;
mod state;
mod store;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::state::ServiceState;
pub use crate::service::store::{
    DEFAULT_STATUS, InMemoryMonitorStore, MonitorId, MonitorRecord, MonitorStore,
    NewMonitorRecord, ParseMonitorIdError, PgMonitorStore, StoreBackend, StoreError,
    StoreResult,
};
pub use crate::{Error, Result};
