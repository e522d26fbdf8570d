//! # probe-design
//!
//! A library for designing oligonucleotide probe sets against RNA targets.
//!
//! Hybridization assays need dozens of probes per transcript, all binding
//! with similar strength, none overlapping, none landing in repeats or
//! exon junctions. Picking them by hand does not scale past a couple of
//! genes.
//!
//! `probe-design` scores every candidate window by the squared deviation of
//! its predicted RNA:DNA hybrid free energy from a target value, then runs a
//! dynamic program that places as many probes as possible while minimizing
//! the mean score, subject to a minimum spacing between neighbors.
//!
//! ## Features
//!
//! - **Nearest-neighbor thermodynamics**: RNA:DNA hybrid free energy and
//!   melting temperature from the Sugimoto parameter set
//! - **Fixed-length design**: one probe length, fast dense dynamic program
//! - **Mixed-length design**: per-probe length choice within a range
//! - **Masking**: repeat-masked FASTA input and N runs keep probes out of
//!   repeats; record junctions are never crossed
//! - **More probes beats lower badness**: the selector always prefers the
//!   largest feasible probe count
//!
//! ## Example
//!
//! ```rust,no_run
//! use probe_design::core::params::DesignParams;
//! use probe_design::design::design_probes;
//! use probe_design::masking::MaskSet;
//! use probe_design::parsing::fasta::read_working_sequence;
//! use probe_design::thermo::rna_dna::RnaDnaHybrid;
//!
//! let ws = read_working_sequence(std::path::Path::new("gapdh.fa")).unwrap();
//! let params = DesignParams::default();
//! let mask = MaskSet::new(ws.sequence.len());
//!
//! let outcome =
//!     design_probes(&ws.sequence, "gapdh", &params, mask, &RnaDnaHybrid::default()).unwrap();
//!
//! for probe in &outcome.probes {
//!     println!("{}\t{}\t{}", probe.name, probe.position, probe.sequence);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for parameters, placements, and probes
//! - [`thermo`]: Nearest-neighbor thermodynamic model
//! - [`design`]: Badness scoring, placement optimizers, selection,
//!   materialization
//! - [`masking`]: Per-nucleotide mask flags and window disqualification
//! - [`parsing`]: FASTA ingestion
//! - [`report`]: Output file writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod design;
pub mod masking;
pub mod parsing;
pub mod report;
pub mod thermo;

// Re-export commonly used types for convenience
pub use crate::core::params::DesignParams;
pub use crate::core::probe::{DesignOutcome, Placement, Probe, Solution};
pub use design::design_probes;
pub use masking::MaskSet;
pub use thermo::rna_dna::RnaDnaHybrid;
pub use thermo::{ThermoError, ThermoModel};
