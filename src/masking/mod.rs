//! Per-nucleotide mask flags and window-level cost overrides.
//!
//! Masking sources (unknown-base runs in the input, a separate repeat-masked
//! FASTA) each produce a flag per nucleotide; independent sources are summed
//! into one array, and the optimizer only cares about the nonzero/zero
//! distinction. A window is unusable when any position it covers is masked;
//! the override only ever turns a finite cost into infinity.
//!
//! Alignment-based masking (pseudogene/genome hits) would plug in here as
//! just another flag source, but running aligners is outside this tool.

use tracing::info;

use crate::core::sequence::UNKNOWN_BASE;
use crate::design::badness::{CostGrid, DISQUALIFIED};

/// Summed mask flags plus the overlay strings shown in the sequence report.
#[derive(Debug, Clone)]
pub struct MaskSet {
    flags: Vec<u32>,
    overlays: Vec<String>,
}

impl MaskSet {
    /// Empty mask over a sequence of the given length.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![0; len],
            overlays: Vec::new(),
        }
    }

    /// Fold one masking source into the set and record its overlay: the
    /// sequence with `overlay_char` at each masked position.
    ///
    /// # Panics
    ///
    /// Panics if the source length does not match the sequence length;
    /// callers build both from the same working sequence.
    pub fn add_source(&mut self, source: &[u32], overlay_char: char, seq: &str) {
        assert_eq!(source.len(), self.flags.len(), "mask source length mismatch");

        let masked = source.iter().filter(|&&v| v > 0).count();
        info!(positions = masked, overlay = %overlay_char, "applying mask source");

        for (flag, v) in self.flags.iter_mut().zip(source) {
            *flag += v;
        }
        self.overlays.push(
            seq.chars()
                .zip(source)
                .map(|(c, &v)| if v > 0 { overlay_char } else { c })
                .collect(),
        );
    }

    /// Record an overlay that is not a masking source (e.g. feasibility).
    pub fn push_overlay(&mut self, overlay: String) {
        self.overlays.push(overlay);
    }

    #[must_use]
    pub fn any_masked(&self) -> bool {
        self.flags.iter().any(|&v| v > 0)
    }

    #[must_use]
    pub fn flags(&self) -> &[u32] {
        &self.flags
    }

    #[must_use]
    pub fn overlays(&self) -> &[String] {
        &self.overlays
    }

    /// Split into the flag array and overlay strings for the outcome record.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u32>, Vec<String>) {
        (self.flags, self.overlays)
    }
}

/// One flag per position marking unknown (`n`) bases, the convention used by
/// repeat-masked FASTA output.
#[must_use]
pub fn flags_from_unknown_bases(seq: &str) -> Vec<u32> {
    seq.chars()
        .map(|c| u32::from(c == UNKNOWN_BASE))
        .collect()
}

/// Prefix counts of masked positions, for O(1) window queries.
fn masked_prefix(flags: &[u32]) -> Vec<usize> {
    let mut prefix = Vec::with_capacity(flags.len() + 1);
    prefix.push(0);
    let mut total = 0;
    for &v in flags {
        total += usize::from(v > 0);
        prefix.push(total);
    }
    prefix
}

/// Disqualify every fixed-length window covering a masked nucleotide.
pub fn apply_to_costs(flags: &[u32], costs: &mut [f64], oligo_len: usize) {
    let prefix = masked_prefix(flags);
    for (start, cost) in costs.iter_mut().enumerate() {
        if prefix[start + oligo_len] > prefix[start] {
            *cost = DISQUALIFIED;
        }
    }
}

/// Disqualify every (start, length) window covering a masked nucleotide.
pub fn apply_to_grid(flags: &[u32], grid: &mut CostGrid) {
    let prefix = masked_prefix(flags);
    for start in 0..grid.n_starts() {
        for length in grid.min_len()..=grid.max_len() {
            if start + length > flags.len() {
                break; // out of bounds, already disqualified
            }
            if prefix[start + length] > prefix[start] {
                grid.disqualify(start, length);
            }
        }
    }
}

/// Overlay marking positions where no fixed-length window can start.
#[must_use]
pub fn infeasible_overlay_fixed(seq: &str, costs: &[f64]) -> String {
    seq.chars()
        .enumerate()
        .map(|(i, c)| {
            if i < costs.len() && costs[i].is_finite() {
                c
            } else {
                'F'
            }
        })
        .collect()
}

/// Overlay marking positions where no window of any length can start.
#[must_use]
pub fn infeasible_overlay_mixed(seq: &str, grid: &CostGrid) -> String {
    seq.chars()
        .enumerate()
        .map(|(i, c)| {
            if i < grid.n_starts() && grid.any_usable_at(i) {
                c
            } else {
                'F'
            }
        })
        .collect()
}
