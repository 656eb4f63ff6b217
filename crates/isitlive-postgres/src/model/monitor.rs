//! Monitor model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::monitors;

/// A row of the `monitors` table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = monitors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Monitor {
    /// Unique monitor identifier.
    pub id: Uuid,
    /// Human-readable name, 1 to 200 characters.
    pub name: String,
    /// Target URL, 1 to 1000 characters.
    pub url: String,
    /// Liveness status token.
    pub status: String,
    /// When the target was last checked, if ever.
    pub last_checked_utc: Option<Timestamp>,
}

/// Data for inserting a monitor.
///
/// A `None` status lets the column default (`UNKNOWN`) apply.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = monitors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMonitor {
    /// Identifier for the new row, see [`NewMonitor::generate_id`].
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Target URL.
    pub url: String,
    /// Initial status.
    pub status: Option<String>,
}

impl NewMonitor {
    /// Creates an insert with a freshly generated identifier.
    pub fn new(name: impl Into<String>, url: impl Into<String>, status: Option<String>) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            url: url.into(),
            status,
        }
    }

    /// Generates a UUIDv7, so byte order follows creation order.
    #[inline]
    pub fn generate_id() -> Uuid {
        Uuid::now_v7()
    }
}

impl Monitor {
    /// Returns the last check time as a [`jiff::Timestamp`].
    #[inline]
    pub fn last_checked_at(&self) -> Option<jiff::Timestamp> {
        self.last_checked_utc.map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_and_ordered() {
        let first = NewMonitor::new("a", "https://a.example", None);
        let second = NewMonitor::new("a", "https://a.example", None);

        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
        assert_eq!(first.id.get_version_num(), 7);
    }
}
