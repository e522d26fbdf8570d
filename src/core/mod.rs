//! Core data types for probe design.
//!
//! - [`sequence`]: working-sequence construction and nucleotide helpers
//! - [`probe`]: placements, solutions, and materialized probe records
//! - [`params`]: run configuration and fail-fast validation

pub mod params;
pub mod probe;
pub mod sequence;
