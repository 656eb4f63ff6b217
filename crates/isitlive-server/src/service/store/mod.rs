//! Monitor storage behind a single object-safe trait.
//!
//! [`InMemoryMonitorStore`] keeps records in process memory and issues
//! sequential ids. [`PgMonitorStore`] persists to PostgreSQL and issues
//! UUIDv7 ids. Both return [`MonitorStore::list`] ordered by name with ties
//! in insertion order.

mod memory;
mod postgres;
mod record;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use self::memory::InMemoryMonitorStore;
pub use self::postgres::PgMonitorStore;
pub use self::record::{
    DEFAULT_STATUS, MonitorId, MonitorRecord, NewMonitorRecord, ParseMonitorIdError,
};
use crate::BoxedError;

/// Result type for [`MonitorStore`] operations.
pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Failure of the storage backend.
///
/// Neither variant is retried by the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is temporarily unreachable, for example a pool timeout.
    #[error("monitor store is unavailable: {0}")]
    Unavailable(#[source] BoxedError),

    /// Any other storage failure.
    #[error("monitor store failed: {0}")]
    Backend(#[source] BoxedError),
}

impl StoreError {
    /// Returns whether a later attempt may succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Storage backend selected at startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
pub enum StoreBackend {
    /// Process memory, lost on restart.
    #[default]
    Memory,
    /// PostgreSQL through [`isitlive_postgres`].
    Postgres,
}

/// Registry of monitors.
///
/// Held as `Arc<dyn MonitorStore>` in [`ServiceState`].
///
/// [`ServiceState`]: crate::service::ServiceState
#[async_trait]
pub trait MonitorStore: Send + Sync {
    /// Returns which backend this store is.
    fn backend(&self) -> StoreBackend;

    /// Stores a new monitor under a fresh id and returns it.
    ///
    /// The record is written in one step, so concurrent readers see either
    /// all of it or none of it.
    async fn create(&self, monitor: NewMonitorRecord) -> StoreResult<MonitorRecord>;

    /// Looks up a monitor. Ids this store never issued return `Ok(None)`.
    async fn get(&self, id: &MonitorId) -> StoreResult<Option<MonitorRecord>>;

    /// Returns every monitor ordered by name, ties in insertion order.
    async fn list(&self) -> StoreResult<Vec<MonitorRecord>>;
}
