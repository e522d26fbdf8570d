//! Report writers for design outcomes.
//!
//! Two files per run, matching the long-standing output layout this tool's
//! users script against:
//!
//! - `<name>_oligos.txt`: one tab-separated line per probe
//! - `<name>_seq.txt`: the working sequence wrapped to a fixed width, with
//!   mask/feasibility overlays, probe complements aligned under the template,
//!   and a label line per probe
//!
//! Reported start positions are 1-based nucleotide positions that skip
//! junction markers; in-memory positions stay 0-based string indices.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::probe::DesignOutcome;
use crate::core::sequence::{complement, nucleotide_position, JUNCTION_MARKER};

/// Characters per line in the sequence visualization.
pub const DEFAULT_LINE_WIDTH: usize = 110;

/// Tab-separated probe listing: index, start, GC%, Tm, Gibbs FE, sequence,
/// name. Empty string when no probes were found.
#[must_use]
pub fn oligos_content(outcome: &DesignOutcome) -> String {
    let mut out = String::new();
    for probe in &outcome.probes {
        let start = nucleotide_position(&outcome.sequence, probe.position);
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            probe.index,
            start,
            probe.gc_percent,
            probe.tm,
            probe.gibbs_fe,
            probe.sequence,
            probe.name,
        ));
    }
    out
}

/// Printable probe table for text output.
#[must_use]
pub fn probes_table(outcome: &DesignOutcome) -> String {
    if outcome.probes.is_empty() {
        return "No probes found.".to_string();
    }

    let mut lines = vec![
        "Index\tStart\tGC%\tTm\tGibbs\tSequence\tName".to_string(),
        "-".repeat(80),
    ];
    for probe in &outcome.probes {
        let start = nucleotide_position(&outcome.sequence, probe.position);
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            probe.index,
            start,
            probe.gc_percent,
            probe.tm,
            probe.gibbs_fe,
            probe.sequence,
            probe.name,
        ));
    }
    lines.join("\n")
}

/// Wrapped visualization of the sequence, overlays, probe alignments, and
/// probe labels.
#[must_use]
pub fn seq_content(outcome: &DesignOutcome, line_width: usize) -> String {
    let seq = &outcome.sequence;
    let seq_chars: Vec<char> = seq.chars().collect();

    let mut align = vec![' '; seq_chars.len()];
    let mut labels = vec![' '; seq_chars.len()];

    for probe in &outcome.probes {
        // Complement of the template window, placed under the template with
        // marker positions left blank
        let template: String = seq_chars
            .iter()
            .skip(probe.position)
            .filter(|&&c| c != JUNCTION_MARKER)
            .take(probe.length)
            .collect();
        let comp: Vec<char> = complement(&template).chars().collect();

        let mut comp_idx = 0;
        let mut pos = probe.position;
        while comp_idx < comp.len() && pos < seq_chars.len() {
            if seq_chars[pos] != JUNCTION_MARKER {
                align[pos] = comp[comp_idx];
                comp_idx += 1;
            }
            pos += 1;
        }

        let start = nucleotide_position(seq, probe.position);
        let label = format!(
            "Prb# {},Pos {},FE {},GC {}",
            probe.index, start, probe.gibbs_fe, probe.gc_percent
        );
        for (i, c) in label.chars().enumerate() {
            if probe.position + i < labels.len() {
                labels[probe.position + i] = c;
            }
        }
    }

    let align: String = align.into_iter().collect();
    let labels: String = labels.into_iter().collect();

    let mut out = String::new();
    let mut start = 0;
    while start < seq_chars.len() {
        let end = (start + line_width).min(seq_chars.len());

        let slice = |s: &str| s.chars().skip(start).take(end - start).collect::<String>();

        out.push_str(&slice(seq));
        out.push('\n');
        for overlay in &outcome.overlays {
            out.push_str(&slice(overlay));
            out.push('\n');
        }
        out.push_str(&slice(&align));
        out.push('\n');
        out.push_str(&slice(&labels));
        out.push('\n');
        out.push('\n');

        start = end;
    }

    out
}

/// Write `<name>_oligos.txt` and `<name>_seq.txt`, creating the output
/// directory if needed. Returns the paths written.
///
/// # Errors
///
/// Returns an `io::Error` if the directory or either file cannot be written.
pub fn write_output_files(
    outcome: &DesignOutcome,
    output_dir: Option<&Path>,
) -> io::Result<(PathBuf, PathBuf)> {
    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let oligos_path = dir.join(format!("{}_oligos.txt", outcome.run_name));
    let seq_path = dir.join(format!("{}_seq.txt", outcome.run_name));

    fs::write(&oligos_path, oligos_content(outcome))?;
    fs::write(&seq_path, seq_content(outcome, DEFAULT_LINE_WIDTH))?;

    info!(
        oligos = %oligos_path.display(),
        seq = %seq_path.display(),
        "wrote output files"
    );

    Ok((oligos_path, seq_path))
}
