//! SQLite-based store using `SeaORM`.
//!
//! A single `SqliteStore` implements `DomainRepository` and `BookingRepository`
//! against one local `SQLite` database file.

mod booking_repo;
mod domain_repo;
pub(crate) mod entity;
mod migration;

use std::path::Path;

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use shepherd_core::error::{CoreError, CoreResult};

use migration::Migrator;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed domain and booking storage.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring the schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("[sqlite] Store ready at {}", db_path.display());
        Ok(store)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_stored_date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field} '{value}': {e}")))
}
