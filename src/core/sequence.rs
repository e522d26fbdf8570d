//! Working-sequence utilities.
//!
//! A design run operates on a single lowercase "working sequence" built by
//! concatenating every record of the input FASTA, with a `>` junction marker
//! inserted at each record boundary. Positions are 0-based over that string,
//! markers included; reported probe coordinates are converted back to 1-based
//! nucleotide positions that skip the markers.

/// Marker inserted between concatenated FASTA records.
pub const JUNCTION_MARKER: char = '>';

/// Placeholder for an unknown or hard-masked base.
pub const UNKNOWN_BASE: char = 'n';

/// Lowercase the raw sequence and keep only `acgtn` and the junction marker.
///
/// Whitespace, digits, and any stray IUPAC ambiguity codes are dropped so the
/// scorer only ever sees the five characters it knows how to classify.
#[must_use]
pub fn clean_sequence(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|&c| matches!(c, 'a' | 'c' | 'g' | 't' | 'n' | JUNCTION_MARKER))
        .collect()
}

/// Join record sequences into one working sequence with junction markers.
#[must_use]
pub fn concat_records(seqs: &[String]) -> String {
    seqs.join(&JUNCTION_MARKER.to_string())
}

/// True when the window contains anything outside the plain `acgt` alphabet.
///
/// Unknown bases and junction markers both count as invalid here; a candidate
/// window covering either is disqualified rather than scored.
#[must_use]
pub fn has_invalid_chars(window: &str) -> bool {
    !window.chars().all(|c| matches!(c, 'a' | 'c' | 'g' | 't'))
}

/// Complement of a single base. Unknown bases map to themselves.
#[must_use]
pub fn complement_base(base: char) -> char {
    match base {
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        other => other,
    }
}

/// Base-wise complement, same orientation.
#[must_use]
pub fn complement(seq: &str) -> String {
    seq.chars().map(complement_base).collect()
}

/// Reverse complement: the sequence of the antiparallel strand, 5' to 3'.
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

/// Fraction of G/C bases, in `[0, 1]`. Empty sequences score 0.
#[must_use]
pub fn gc_fraction(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq.chars().filter(|c| matches!(c, 'g' | 'c')).count();
    #[allow(clippy::cast_precision_loss)] // Sequence lengths fit f64 mantissa
    {
        gc as f64 / seq.len() as f64
    }
}

/// Collect exactly `length` non-marker characters starting at `start`.
///
/// Winning placements never straddle markers (such windows are disqualified
/// during scoring), so the skip is defensive. Truncates at the sequence end.
#[must_use]
pub fn template_window(seq: &str, start: usize, length: usize) -> String {
    seq.chars()
        .skip(start)
        .filter(|&c| c != JUNCTION_MARKER)
        .take(length)
        .collect()
}

/// Convert a 0-based string position to a 1-based nucleotide position,
/// not counting junction markers before it.
#[must_use]
pub fn nucleotide_position(seq: &str, pos: usize) -> usize {
    let markers = seq.chars().take(pos).filter(|&c| c == JUNCTION_MARKER).count();
    pos - markers + 1
}
