//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Version stamped into `PRAGMA user_version` once the schema is in place.
const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes of tasks and associations rely on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings databases created by older versions up to date.
    fn apply_migrations(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version < SCHEMA_VERSION {
            log::debug!("Migrating board database from version {version} to {SCHEMA_VERSION}");
            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .db_context("Failed to stamp schema version")?;
        }

        Ok(())
    }
}
