use diesel::migration::MigrationSource;
use diesel::pg::Pg;
use diesel::sql_query;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, info, instrument, warn};

use super::MigrationStatus;
use crate::{MIGRATIONS, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Bookkeeping table maintained by `diesel_migrations`.
const MIGRATIONS_TABLE: &str = "__diesel_schema_migrations";

#[derive(diesel::QueryableByName)]
struct ExistsResult {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    exists: bool,
}

/// Compares the embedded migrations with the ones recorded in the database.
///
/// A database that has never been migrated reports every embedded migration
/// as pending.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_migration_status(conn: &mut AsyncPgConnection) -> PgResult<MigrationStatus> {
    debug!(target: TRACING_TARGET_MIGRATION, "Checking database migration status");

    let applied_versions = if table_exists(conn, MIGRATIONS_TABLE).await? {
        get_applied_migrations(conn).await?
    } else {
        Vec::new()
    };

    let status = MigrationStatus::from_versions(embedded_versions()?, applied_versions);

    debug!(
        target: TRACING_TARGET_MIGRATION,
        applied_count = status.applied_migrations(),
        pending_count = status.pending_migrations(),
        is_up_to_date = status.is_up_to_date(),
        "Migration status retrieved"
    );

    Ok(status)
}

/// Verifies that the migration table and the `monitors` table exist.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn verify_schema_integrity(conn: &mut AsyncPgConnection) -> PgResult<()> {
    info!(target: TRACING_TARGET_MIGRATION, "Verifying database schema integrity");

    for table in [MIGRATIONS_TABLE, "monitors"] {
        if !table_exists(conn, table).await? {
            warn!(target: TRACING_TARGET_MIGRATION, table, "Required table is missing");
            return Err(PgError::Migration(
                format!("Table {table} does not exist, run migrations first").into(),
            ));
        }
    }

    info!(target: TRACING_TARGET_MIGRATION, "Database schema integrity verified");
    Ok(())
}

/// Returns the applied migration versions in ascending order.
#[instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_applied_migrations(conn: &mut AsyncPgConnection) -> PgResult<Vec<String>> {
    #[derive(diesel::QueryableByName)]
    struct MigrationVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let versions = sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version")
        .get_results::<MigrationVersion>(conn)
        .await
        .map_err(|e| PgError::Migration(format!("Failed to get applied migrations: {e}").into()))?
        .into_iter()
        .map(|row| row.version)
        .collect();

    Ok(versions)
}

/// Returns the versions of all migrations compiled into this crate.
fn embedded_versions() -> PgResult<Vec<String>> {
    let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).map_err(PgError::Migration)?;
    let mut versions: Vec<String> = migrations
        .iter()
        .map(|migration| migration.name().version().to_string())
        .collect();
    versions.sort();
    Ok(versions)
}

async fn table_exists(conn: &mut AsyncPgConnection, table: &str) -> PgResult<bool> {
    let result = sql_query(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
         ) AS exists",
    )
    .bind::<diesel::sql_types::Text, _>(table)
    .get_result::<ExistsResult>(conn)
    .await
    .map_err(|e| PgError::Migration(format!("Failed to check table {table}: {e}").into()))?;

    Ok(result.exists)
}

#[cfg(test)]
mod tests {
    use super::embedded_versions;

    #[test]
    fn embedded_migrations_are_discovered() {
        let versions = embedded_versions().expect("embedded migrations should load");
        assert!(versions.iter().any(|v| v == "20250926203907"));
    }
}
