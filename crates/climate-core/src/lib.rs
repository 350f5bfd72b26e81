//! Core data types for the climate dataset
//!
//! This crate provides the record types shared by the store, the query
//! engine, and the API surface, plus the trait seam a dataset snapshot is
//! loaded through.

pub mod source;
pub mod types;

pub use source::*;
pub use types::*;
