use std::sync::Arc;

use crate::Result;
use crate::service::{InMemoryMonitorStore, MonitorStore, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pub monitor_store: Arc<dyn MonitorStore>,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to PostgreSQL and migrates it when that backend is selected.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            monitor_store: service_config.build_store().await?,
        })
    }

    /// Wraps an already constructed store.
    pub fn new(monitor_store: impl MonitorStore + 'static) -> Self {
        Self {
            monitor_store: Arc::new(monitor_store),
        }
    }

    /// Returns state backed by an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryMonitorStore::new())
    }
}

impl std::fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceState")
            .field("monitor_store", &self.monitor_store.backend())
            .finish()
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(monitor_store: Arc<dyn MonitorStore>);
