#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Migrations compiled into the binary from `./migrations`.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

/// Tracing target for client lifecycle and configuration events.
pub const TRACING_TARGET_CLIENT: &str = "isitlive_postgres::client";

/// Tracing target for query execution.
pub const TRACING_TARGET_QUERY: &str = "isitlive_postgres::queries";

/// Tracing target for migration runs and status checks.
pub const TRACING_TARGET_MIGRATION: &str = "isitlive_postgres::migrations";

/// Tracing target for connection establishment and pool management.
pub const TRACING_TARGET_CONNECTION: &str = "isitlive_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::Error;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, DEFAULT_POSTGRES_URL, MigrationResult, MigrationStatus, PgClient,
    PgClientMigrationExt, PgConfig, PgConn, PgPoolStatus, PooledConnection,
    get_applied_migrations, get_migration_status, run_pending_migrations,
    verify_schema_integrity,
};

pub mod error {
    //! Error types and helpers for database operations.
    //!
    //! See [`PgError`] for the main error type used throughout this crate.
    //!
    //! [`PgError`]: crate::PgError

    /// Type-erased error type for dynamic error handling.
    pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

    use std::borrow::Cow;

    pub use deadpool::managed::TimeoutType;
    pub use diesel_async::pooled_connection::PoolError as DieselPoolError;
    pub use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

    /// Provides a remediation hint for an error condition.
    pub trait ErrorHint {
        /// Returns a short, actionable hint.
        fn hint(&self) -> Cow<'static, str>;
    }

    impl ErrorHint for TimeoutType {
        fn hint(&self) -> Cow<'static, str> {
            match self {
                TimeoutType::Wait => Cow::Borrowed(
                    "Connection pool is exhausted, consider raising POSTGRES_MAX_CONNECTIONS",
                ),
                TimeoutType::Create => Cow::Borrowed(
                    "Unable to establish a new database connection, check POSTGRES_URL and database availability",
                ),
                TimeoutType::Recycle => Cow::Borrowed(
                    "Failed to recycle a database connection, it may be in an invalid state",
                ),
            }
        }
    }
}

/// Error type for all PostgreSQL operations in this crate.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Waiting for, creating or recycling a pooled connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or keep a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying the embedded migrations failed.
    #[error("Database migration error: {0}")]
    Migration(error::BoxError),

    /// Query execution failed.
    ///
    /// This includes SQL errors, constraint violations and type mismatches.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Anything not covered by the other variants.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Returns whether this error is transient and the database may recover.
    ///
    /// Pool timeouts, closed pools and broken connections are transient.
    pub fn is_transient(&self) -> bool {
        match self {
            PgError::Timeout(_) => true,
            PgError::Connection(ConnectionError::BadConnection(_)) => true,
            PgError::Connection(ConnectionError::InvalidConnectionUrl(_)) => false,
            PgError::Connection(_) => true,
            PgError::Query(Error::BrokenTransactionManager) => true,
            PgError::Query(Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ClosedConnection,
                _,
            )) => true,
            _ => false,
        }
    }
}

impl From<error::DeadpoolError> for PgError {
    fn from(value: error::DeadpoolError) -> Self {
        use error::{DeadpoolError, DieselPoolError};

        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(target: TRACING_TARGET_CONNECTION, error = %err, "Unexpected post-create hook error");
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!(target: TRACING_TARGET_CONNECTION, "No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::BadConnection(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_transient() {
        assert!(PgError::Timeout(TimeoutType::Wait).is_transient());
        assert!(PgError::Timeout(TimeoutType::Create).is_transient());
    }

    #[test]
    fn closed_pool_is_transient() {
        let error = PgError::from(error::DeadpoolError::Closed);
        assert!(error.is_transient());
    }

    #[test]
    fn config_and_query_errors_are_not_transient() {
        assert!(!PgError::Config("missing url".into()).is_transient());
        assert!(!PgError::Query(Error::NotFound).is_transient());
        assert!(!PgError::Unexpected("boom".into()).is_transient());
    }

    #[test]
    fn invalid_url_is_not_transient() {
        let error = PgError::Connection(ConnectionError::InvalidConnectionUrl("nope".into()));
        assert!(!error.is_transient());
    }

    #[test]
    fn timeouts_carry_hints() {
        use crate::error::ErrorHint;

        assert!(TimeoutType::Wait.hint().contains("POSTGRES_MAX_CONNECTIONS"));
        assert!(TimeoutType::Create.hint().contains("POSTGRES_URL"));
    }
}
