//! Dataset store backed by the source SQLite database
//!
//! The database is produced by an external pipeline and read as-is — NO
//! migrations. Both tables are scanned once at startup into an immutable
//! [`climate_core::Dataset`] snapshot.

pub mod client;
pub mod rows;

pub use client::*;
pub use rows::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed date {value:?} in measurement row {row}")]
    MalformedDate { row: i64, value: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
