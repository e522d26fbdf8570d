//! Implementation of the `design` subcommand.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;
use tracing::info;

use crate::cli::{OutputFormat, ParamArgs};
use crate::core::probe::DesignOutcome;
use crate::core::sequence::UNKNOWN_BASE;
use crate::design;
use crate::masking::{self, MaskSet};
use crate::parsing::fasta::{file_stem_name, read_working_sequence};
use crate::report;
use crate::thermo::rna_dna::RnaDnaHybrid;

#[derive(clap::Args)]
pub struct DesignArgs {
    /// Input FASTA file (.fa/.fasta/.fna, optionally gzip compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Base name for output files and probe names (default: input file stem)
    #[arg(long)]
    pub output_name: Option<String>,

    /// Directory for output files (default: current directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Repeat-masked copy of the input; masked bases are N, coordinates match
    /// the input exactly
    #[arg(long)]
    pub repeat_mask_file: Option<PathBuf>,

    /// Print results only, skip writing the _oligos/_seq files
    #[arg(long)]
    pub no_files: bool,
}

/// Run the design command
pub fn run(args: DesignArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = args.params.to_params();
    params.validate()?;

    let ws = read_working_sequence(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    if verbose {
        eprintln!(
            "Read {} record(s), {} characters from {}",
            ws.record_count,
            ws.sequence.len(),
            args.input.display()
        );
    }

    let run_name = args
        .output_name
        .clone()
        .unwrap_or_else(|| file_stem_name(&args.input));

    let mask = build_mask(&ws.sequence, args.repeat_mask_file.as_deref())?;

    let thermo = RnaDnaHybrid::default();
    let outcome = design::design_probes(&ws.sequence, &run_name, &params, mask, &thermo)?;

    if !args.no_files {
        let (oligos, seq) = report::write_output_files(&outcome, args.output_dir.as_deref())?;
        if verbose {
            eprintln!("Wrote {} and {}", oligos.display(), seq.display());
        }
    }

    print_outcome(&outcome, format)?;
    Ok(())
}

/// Assemble the mask for a working sequence. A repeat-mask file contributes
/// flags wherever it has N; without one, N runs in the input itself are
/// treated as pre-masked.
pub(crate) fn build_mask(seq: &str, repeat_mask_file: Option<&Path>) -> anyhow::Result<MaskSet> {
    let mut mask = MaskSet::new(seq.len());

    if let Some(path) = repeat_mask_file {
        let masked = read_working_sequence(path)
            .with_context(|| format!("Failed to read repeat-mask file {}", path.display()))?;
        if masked.sequence.len() != seq.len() {
            anyhow::bail!(
                "Repeat-mask file length ({}) does not match input length ({})",
                masked.sequence.len(),
                seq.len()
            );
        }
        let flags = masking::flags_from_unknown_bases(&masked.sequence);
        mask.add_source(&flags, 'R', seq);
        info!(path = %path.display(), "applied repeat mask");
    } else if seq.contains(UNKNOWN_BASE) {
        let flags = masking::flags_from_unknown_bases(seq);
        mask.add_source(&flags, 'R', seq);
        info!("masked N runs found in the input");
    }

    Ok(mask)
}

/// Print a design outcome to stdout in the requested format.
pub(crate) fn print_outcome(outcome: &DesignOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", report::probes_table(outcome));
            if !outcome.probes.is_empty() {
                println!(
                    "\n{} probes, mean badness {:.4}",
                    outcome.probes.len(),
                    outcome.score
                );
            }
        }
        OutputFormat::Json => {
            // Infinite scores have no JSON representation; emit null
            let score = outcome.score.is_finite().then_some(outcome.score);
            let masked_positions = outcome.mask_flags.iter().filter(|&&v| v > 0).count();
            let value = json!({
                "run_name": outcome.run_name,
                "probe_count": outcome.probes.len(),
                "score": score,
                "masked_positions": masked_positions,
                "mask_flags": outcome.mask_flags,
                "probes": outcome.probes,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Tsv => {
            print!("{}", report::oligos_content(outcome));
        }
    }
    Ok(())
}
