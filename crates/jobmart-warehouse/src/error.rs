use thiserror::Error;

/// Errors that can occur while reading the warehouse.
///
/// None of these are retried or recovered here — a failed read surfaces
/// immediately to the caller (the dashboard turns it into an empty-state
/// notice).
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The backing database file does not exist at the configured path.
    #[error("warehouse file not found: {path}")]
    NotFound { path: String },

    /// The requested mart table is absent from the database.
    #[error("mart table missing from warehouse: {table}")]
    TableMissing { table: String },

    /// A SQLite operation failed (malformed query, schema mismatch, locked file).
    #[error("warehouse query failed: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
