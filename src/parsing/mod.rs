//! Input parsers.
//!
//! - [`fasta`]: FASTA reading and working-sequence construction

pub mod fasta;

pub use fasta::{ParseError, WorkingSequence};
