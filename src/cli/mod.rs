//! Command-line interface for probe-design.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **design**: design a probe set against one FASTA input
//! - **batch**: design probe sets for every FASTA file in a directory
//!
//! ## Usage
//!
//! ```text
//! # Design 48 probes of length 20 with default thermodynamics
//! probe-design design transcript.fa
//!
//! # Mixed-length design with a tighter energy window
//! probe-design design transcript.fa --min-length 18 --max-length 22 \
//!     --min-gibbs -25 --max-gibbs -21
//!
//! # Use a RepeatMasker-style masked copy of the input
//! probe-design design transcript.fa --repeat-mask-file transcript.masked.fa
//!
//! # JSON output for scripting
//! probe-design design transcript.fa --format json
//!
//! # Whole directory at once
//! probe-design batch fasta_dir/ -o designs/
//! ```

use clap::{Parser, Subcommand};

use crate::core::params::DesignParams;

pub mod batch;
pub mod design;

#[derive(Parser)]
#[command(name = "probe-design")]
#[command(version)]
#[command(about = "Design optimal oligonucleotide probe sets against RNA targets")]
#[command(
    long_about = "probe-design selects an optimal set of oligonucleotide probes against a target sequence.\n\nEach candidate window is scored by the squared deviation of its RNA:DNA hybrid free energy from a target value; a dynamic program then places the largest possible number of probes minimizing the mean score, subject to a minimum spacing. Masked regions (N runs, or a separate repeat-masked FASTA) are never covered by a probe."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Design probes against a single FASTA input
    Design(design::DesignArgs),

    /// Design probes for every FASTA file in a directory
    Batch(batch::BatchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Design parameters shared by the design and batch subcommands.
#[derive(clap::Args, Debug, Clone)]
pub struct ParamArgs {
    /// Maximum number of probes to design
    #[arg(short = 'n', long, default_value = "48")]
    pub probes: usize,

    /// Probe length for fixed-length design
    #[arg(long, default_value = "20")]
    pub oligo_length: usize,

    /// Minimum number of unused bases between consecutive probes
    #[arg(long, default_value = "2")]
    pub spacer_length: usize,

    /// Target Gibbs free energy in kcal/mol
    #[arg(long, default_value = "-23.0", allow_negative_numbers = true)]
    pub target_gibbs: f64,

    /// Lower bound of the allowable Gibbs free energy range (kcal/mol)
    #[arg(long, default_value = "-26.0", allow_negative_numbers = true)]
    pub min_gibbs: f64,

    /// Upper bound of the allowable Gibbs free energy range (kcal/mol)
    #[arg(long, default_value = "-20.0", allow_negative_numbers = true)]
    pub max_gibbs: f64,

    /// Minimum probe length; enables mixed-length design
    #[arg(long, requires = "max_length")]
    pub min_length: Option<usize>,

    /// Maximum probe length; enables mixed-length design
    #[arg(long, requires = "min_length")]
    pub max_length: Option<usize>,
}

impl ParamArgs {
    /// Build core design parameters. Validation happens separately so the
    /// caller can fail fast before touching the input.
    #[must_use]
    pub fn to_params(&self) -> DesignParams {
        DesignParams {
            n_probes: self.probes,
            oligo_len: self.oligo_length,
            spacer_len: self.spacer_length,
            target_gibbs: self.target_gibbs,
            allowable_gibbs: (self.min_gibbs, self.max_gibbs),
            mixed_lengths: self.min_length.zip(self.max_length),
        }
    }
}
