//! FASTA ingestion using noodles.
//!
//! Reads every record of the input, concatenates the sequences into one
//! lowercase working sequence with a `>` junction marker at each record
//! boundary, and drops everything outside the `acgtn` alphabet.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::sequence::{clean_sequence, concat_records};

/// Maximum working-sequence length accepted from one file (DOS protection;
/// probe design targets are transcripts, not chromosomes).
pub const MAX_SEQUENCE_LENGTH: usize = 10_000_000;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Sequence too long: {0} bases exceeds maximum allowed ({MAX_SEQUENCE_LENGTH})")]
    SequenceTooLong(usize),
}

/// A cleaned, concatenated target sequence ready for design.
#[derive(Debug, Clone)]
pub struct WorkingSequence {
    /// Lowercase `acgtn` with `>` markers at record junctions
    pub sequence: String,

    /// Number of FASTA records concatenated
    pub record_count: usize,
}

/// Check if the path has a FASTA extension
#[must_use]
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Default run name for an input: the file stem with any FASTA extension
/// layers removed (`gene.fa.gz` becomes `gene`).
#[must_use]
pub fn file_stem_name(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map_or_else(|| "design".to_string(), |n| n.to_string_lossy().to_string());

    for ext in [".bgz", ".gz", ".fasta", ".fna", ".fa"] {
        if let Some(stripped) = name.to_lowercase().strip_suffix(ext) {
            name.truncate(stripped.len());
        }
    }

    if name.is_empty() {
        "design".to_string()
    } else {
        name
    }
}

/// Read a FASTA file into a working sequence.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::SequenceTooLong` if the limit is exceeded.
pub fn read_working_sequence(path: &Path) -> Result<WorkingSequence, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let mut reader = fasta::io::Reader::new(BufReader::new(GzDecoder::new(file)));
        read_from_reader(&mut reader)
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        read_from_reader(&mut reader)
    }
}

fn read_from_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<WorkingSequence, ParseError> {
    let mut records = Vec::new();
    let mut total = 0usize;

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let raw = String::from_utf8_lossy(record.sequence().as_ref()).to_string();
        total += raw.len();
        if total > MAX_SEQUENCE_LENGTH {
            return Err(ParseError::SequenceTooLong(total));
        }

        records.push(raw);
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    debug!(records = records.len(), bases = total, "read FASTA input");

    Ok(WorkingSequence {
        sequence: clean_sequence(&concat_records(&records)),
        record_count: records.len(),
    })
}
