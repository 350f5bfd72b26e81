//! Query and aggregation layer over the climate dataset
//!
//! All operations are pure reads over an injected [`climate_core::Dataset`]
//! snapshot: repeated calls against the same snapshot return identical
//! results, and concurrent callers need no coordination.

pub mod date;
pub mod engine;

pub use date::*;
pub use engine::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The supplied text does not parse as a calendar date
    #[error("Invalid date: {input}")]
    InvalidDate { input: String },

    /// An aggregate or most-active-station computation has no rows
    #[error("No matching observations")]
    NoData,

    /// Reserved for stricter station/date validation
    #[error("Not found")]
    NotFound,
}

pub type QueryResult<T> = Result<T, QueryError>;
