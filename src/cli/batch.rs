//! Implementation of the `batch` subcommand.
//!
//! Runs the design pipeline for every FASTA file in a directory, writes the
//! usual per-run output files, and finishes with a `batch_summary.tsv`. One
//! bad input never aborts the batch; its row records the error instead.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, warn};

use crate::cli::{OutputFormat, ParamArgs};
use crate::core::probe::DesignOutcome;
use crate::design;
use crate::parsing::fasta::{file_stem_name, is_fasta_file, read_working_sequence};
use crate::report;
use crate::thermo::rna_dna::RnaDnaHybrid;

use super::design::build_mask;

#[derive(clap::Args)]
pub struct BatchArgs {
    /// Directory containing FASTA inputs (searched non-recursively)
    #[arg(required = true)]
    pub input_dir: PathBuf,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Directory for output files
    #[arg(short = 'o', long, default_value = "probe_designs")]
    pub output_dir: PathBuf,
}

/// One line of the batch summary.
struct BatchRow {
    filename: String,
    probes_found: usize,
    score: f64,
    status: &'static str,
    error: String,
}

impl BatchRow {
    fn from_outcome(filename: String, outcome: &DesignOutcome) -> Self {
        Self {
            filename,
            probes_found: outcome.probes.len(),
            score: outcome.score,
            status: if outcome.probes.is_empty() {
                "no_probes"
            } else {
                "ok"
            },
            error: String::new(),
        }
    }

    fn from_error(filename: String, err: &anyhow::Error) -> Self {
        Self {
            filename,
            probes_found: 0,
            score: f64::INFINITY,
            status: "error",
            error: format!("{err:#}"),
        }
    }
}

/// Run the batch command
pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = args.params.to_params();
    params.validate()?;

    let inputs = discover_fasta_files(&args.input_dir)?;
    if inputs.is_empty() {
        eprintln!("No FASTA files found in {}", args.input_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir)?;

    let thermo = RnaDnaHybrid::default();
    let mut rows = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        let filename = input
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().to_string());
        if verbose {
            eprintln!("[{}/{}] {}", i + 1, inputs.len(), filename);
        }

        match run_one(input, &params, &args.output_dir, &thermo) {
            Ok(outcome) => {
                info!(
                    file = %filename,
                    probes = outcome.probes.len(),
                    "design finished"
                );
                rows.push(BatchRow::from_outcome(filename, &outcome));
            }
            Err(err) => {
                warn!(file = %filename, error = %format!("{err:#}"), "design failed");
                rows.push(BatchRow::from_error(filename, &err));
            }
        }
    }

    let summary = summary_content(&rows);
    let summary_path = args.output_dir.join("batch_summary.tsv");
    fs::write(&summary_path, &summary)?;

    print_summary(&rows, &summary, format)?;
    eprintln!("Summary written to {}", summary_path.display());

    Ok(())
}

fn run_one(
    input: &Path,
    params: &crate::core::params::DesignParams,
    output_dir: &Path,
    thermo: &RnaDnaHybrid,
) -> anyhow::Result<DesignOutcome> {
    let ws = read_working_sequence(input)?;
    let run_name = file_stem_name(input);
    let mask = build_mask(&ws.sequence, None)?;

    let outcome = design::design_probes(&ws.sequence, &run_name, params, mask, thermo)?;
    report::write_output_files(&outcome, Some(output_dir))?;
    Ok(outcome)
}

/// FASTA files directly under the directory, sorted by name so batches are
/// reproducible.
fn discover_fasta_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_fasta_file(path))
        .collect();
    files.sort();
    Ok(files)
}

fn summary_content(rows: &[BatchRow]) -> String {
    let mut out = String::from("Filename\tProbes_Found\tScore\tStatus\tError\n");
    for row in rows {
        let score = if row.score.is_finite() {
            format!("{:.4}", row.score)
        } else {
            "N/A".to_string()
        };
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            row.filename, row.probes_found, score, row.status, row.error
        ));
    }
    out
}

fn print_summary(rows: &[BatchRow], summary: &str, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let ok = rows.iter().filter(|r| r.status == "ok").count();
            println!("{summary}");
            println!("{} of {} inputs produced probes", ok, rows.len());
        }
        OutputFormat::Json => {
            let value: Vec<_> = rows
                .iter()
                .map(|row| {
                    json!({
                        "filename": row.filename,
                        "probes_found": row.probes_found,
                        "score": row.score.is_finite().then_some(row.score),
                        "status": row.status,
                        "error": (!row.error.is_empty()).then_some(&row.error),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Tsv => {
            print!("{summary}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_discover_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fa", "a.fasta", "notes.txt", "c.fna"] {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, ">x\nacgt").unwrap();
        }

        let files = discover_fasta_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.fasta", "b.fa", "c.fna"]);
    }

    #[test]
    fn test_discover_rejects_non_directory() {
        assert!(discover_fasta_files(Path::new("/no/such/dir")).is_err());
    }

    #[test]
    fn test_summary_content_formats_scores() {
        let rows = vec![
            BatchRow {
                filename: "a.fa".to_string(),
                probes_found: 3,
                score: 0.125,
                status: "ok",
                error: String::new(),
            },
            BatchRow {
                filename: "b.fa".to_string(),
                probes_found: 0,
                score: f64::INFINITY,
                status: "no_probes",
                error: String::new(),
            },
        ];
        let content = summary_content(&rows);
        assert!(content.contains("a.fa\t3\t0.1250\tok\t\n"));
        assert!(content.contains("b.fa\t0\tN/A\tno_probes\t\n"));
    }
}
