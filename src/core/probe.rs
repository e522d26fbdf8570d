//! Output records produced by a design run.

use serde::Serialize;

/// One chosen probe window: start position and length in working-sequence
/// coordinates (junction markers included in the index space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub start: usize,
    pub length: usize,
}

/// A candidate probe set for one probe count.
///
/// `score` is the arithmetic mean of the per-window costs of the member
/// placements; placements are ordered by start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub score: f64,
    pub placements: Vec<Placement>,
}

impl Solution {
    /// Number of probes in this solution.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.placements.len()
    }
}

/// A fully described probe, materialized from a winning placement.
#[derive(Debug, Clone, Serialize)]
pub struct Probe {
    /// 1-based probe number within the set
    pub index: usize,

    /// 0-based start position in the working sequence
    pub position: usize,

    /// Probe length in bases
    pub length: usize,

    /// Probe sequence: reverse complement of the template window
    pub sequence: String,

    /// GC content rounded to the nearest whole percent
    pub gc_percent: u32,

    /// Melting temperature in degrees C, one decimal
    pub tm: f64,

    /// Hybrid free energy in kcal/mol, one decimal
    pub gibbs_fe: f64,

    /// Probe identifier, `<run_name>_<index>`
    pub name: String,
}

/// Everything a design run hands back to the reporting layer.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub run_name: String,

    /// The working sequence the probes were designed against
    pub sequence: String,

    /// Probes from the selected solution, in increasing position order
    pub probes: Vec<Probe>,

    /// Mean cost of the selected solution; infinite when no probes were found
    pub score: f64,

    /// Summed per-nucleotide mask flags (0 = unmasked)
    pub mask_flags: Vec<u32>,

    /// Mask/feasibility overlay strings for the sequence report
    pub overlays: Vec<String>,
}

impl DesignOutcome {
    /// The "no probes found" outcome. Not an error: callers report it and
    /// move on.
    #[must_use]
    pub fn empty(run_name: &str, sequence: &str, mask_flags: Vec<u32>, overlays: Vec<String>) -> Self {
        Self {
            run_name: run_name.to_string(),
            sequence: sequence.to_string(),
            probes: Vec::new(),
            score: f64::INFINITY,
            mask_flags,
            overlays,
        }
    }
}
