//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Bookings live inside their hotel
//! record as an array of objects whose fields are declared one by one.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "hotel_search_indexes",
        sql: SCHEMA_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1: users and hotels
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string ASSERT $value != '';
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE string;
DEFINE FIELD last_name ON TABLE user TYPE string;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Hotels (bookings embedded, append-only)
-- =======================================================================
DEFINE TABLE hotel SCHEMAFULL;
DEFINE FIELD user_id ON TABLE hotel TYPE string;
DEFINE FIELD name ON TABLE hotel TYPE string ASSERT $value != '';
DEFINE FIELD city ON TABLE hotel TYPE string ASSERT $value != '';
DEFINE FIELD country ON TABLE hotel TYPE string ASSERT $value != '';
DEFINE FIELD description ON TABLE hotel TYPE string \
    ASSERT $value != '';
DEFINE FIELD hotel_type ON TABLE hotel TYPE string ASSERT $value != '';
DEFINE FIELD adult_count ON TABLE hotel TYPE int ASSERT $value >= 0;
DEFINE FIELD child_count ON TABLE hotel TYPE int ASSERT $value >= 0;
DEFINE FIELD facilities ON TABLE hotel TYPE array<string>;
DEFINE FIELD price_per_night ON TABLE hotel TYPE float \
    ASSERT $value >= 0;
DEFINE FIELD star_rating ON TABLE hotel TYPE int \
    ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD image_urls ON TABLE hotel TYPE array<string> DEFAULT [];
DEFINE FIELD last_updated ON TABLE hotel TYPE datetime;
DEFINE FIELD bookings ON TABLE hotel TYPE array<object> DEFAULT [];
DEFINE FIELD bookings[*].booking_id ON TABLE hotel TYPE string;
DEFINE FIELD bookings[*].user_id ON TABLE hotel TYPE string;
DEFINE FIELD bookings[*].first_name ON TABLE hotel TYPE string;
DEFINE FIELD bookings[*].last_name ON TABLE hotel TYPE string;
DEFINE FIELD bookings[*].email ON TABLE hotel TYPE string;
DEFINE FIELD bookings[*].adult_count ON TABLE hotel TYPE int;
DEFINE FIELD bookings[*].child_count ON TABLE hotel TYPE int;
DEFINE FIELD bookings[*].check_in ON TABLE hotel TYPE datetime;
DEFINE FIELD bookings[*].check_out ON TABLE hotel TYPE datetime;
DEFINE FIELD bookings[*].total_cost ON TABLE hotel TYPE float;
DEFINE INDEX idx_hotel_user ON TABLE hotel COLUMNS user_id;
";

// -----------------------------------------------------------------------
// Schema v2: indexes backing the search and listing queries
// -----------------------------------------------------------------------

const SCHEMA_V2: &str = "\
DEFINE INDEX idx_hotel_last_updated ON TABLE hotel COLUMNS last_updated;
DEFINE INDEX idx_hotel_price ON TABLE hotel COLUMNS price_per_night;
DEFINE INDEX idx_hotel_star_rating ON TABLE hotel COLUMNS star_rating;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_both_tables() {
        assert!(SCHEMA_V1.contains("DEFINE TABLE user SCHEMAFULL"));
        assert!(SCHEMA_V1.contains("DEFINE TABLE hotel SCHEMAFULL"));
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
