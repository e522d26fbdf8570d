//! The probe design pipeline.
//!
//! Badness scoring runs once over the whole sequence, one of the two
//! placement optimizers runs over the resulting cost table, the selector
//! picks the final probe count, and the materializer expands the winning
//! placements into probe records:
//!
//! - [`badness`]: window costs and the mixed-length cost grid
//! - [`fixed`]: single-length dynamic program
//! - [`mixed`]: variable-length dynamic program
//! - [`selector`]: final-solution policy
//! - [`materializer`]: placement list to probe records
//!
//! Everything here is synchronous and deterministic; the scratch tables are
//! owned by one call and discarded with it. Batch parallelism belongs to the
//! caller.

use tracing::info;

use crate::core::params::DesignParams;
use crate::core::probe::DesignOutcome;
use crate::masking::{self, MaskSet};
use crate::thermo::{ThermoError, ThermoModel};

pub mod badness;
pub mod fixed;
pub mod materializer;
pub mod mixed;
pub mod selector;

/// Mean costs at or above this are treated as "no real solution": a generous
/// sentinel separating genuine optima from mixtures built out of
/// astronomically bad windows.
pub const VALIDITY_THRESHOLD: f64 = 1_000_000.0;

/// Arithmetic mean after adding one more observation to a mean of `k`.
#[must_use]
pub fn running_mean(old: f64, k: usize, new: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)] // Probe counts are tiny
    {
        (old * k as f64 + new) / (k as f64 + 1.0)
    }
}

/// Run the full design pipeline over a cleaned working sequence.
///
/// The mask set carries any externally derived per-nucleotide flags; a
/// feasibility overlay is appended to it before mask application so the
/// report distinguishes "thermodynamically unusable" from "masked".
///
/// A sequence with no feasible probe set yields an empty outcome with an
/// infinite score, not an error.
///
/// # Errors
///
/// Returns a `ThermoError` only from materializing the winning placements,
/// which scoring-time disqualification rules out by construction.
pub fn design_probes(
    seq: &str,
    run_name: &str,
    params: &DesignParams,
    mut mask: MaskSet,
    thermo: &dyn ThermoModel,
) -> Result<DesignOutcome, ThermoError> {
    let solutions = match params.mixed_lengths {
        Some((min_len, max_len)) => {
            let mut grid = badness::score_mixed(
                seq,
                min_len,
                max_len,
                params.target_gibbs,
                params.allowable_gibbs,
                thermo,
            );
            mask.push_overlay(masking::infeasible_overlay_mixed(seq, &grid));
            if mask.any_masked() {
                masking::apply_to_grid(mask.flags(), &mut grid);
            }
            mixed::find_best_placements(&grid, seq.len(), params.spacer_len, params.n_probes)
        }
        None => {
            let mut costs = badness::score_fixed(
                seq,
                params.oligo_len,
                params.target_gibbs,
                params.allowable_gibbs,
                thermo,
            );
            mask.push_overlay(masking::infeasible_overlay_fixed(seq, &costs));
            if mask.any_masked() {
                masking::apply_to_costs(mask.flags(), &mut costs, params.oligo_len);
            }
            fixed::find_best_placements(&costs, params.oligo_len, params.spacer_len, params.n_probes)
        }
    };

    let (mask_flags, overlays) = mask.into_parts();

    let Some(best) = selector::select_final(&solutions) else {
        info!(run = run_name, "no feasible probe set found");
        return Ok(DesignOutcome::empty(run_name, seq, mask_flags, overlays));
    };

    info!(
        run = run_name,
        probes = best.probe_count(),
        score = best.score,
        "selected solution"
    );

    let probes = materializer::materialize(seq, best, run_name, thermo)?;

    Ok(DesignOutcome {
        run_name: run_name.to_string(),
        sequence: seq.to_string(),
        probes,
        score: best.score,
        mask_flags,
        overlays,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::tests::ScriptedOracle;

    fn params(oligo_len: usize, spacer_len: usize, n_probes: usize) -> DesignParams {
        DesignParams {
            n_probes,
            oligo_len,
            spacer_len,
            target_gibbs: -23.0,
            allowable_gibbs: (-26.0, -20.0),
            mixed_lengths: None,
        }
    }

    #[test]
    fn test_running_mean() {
        assert!((running_mean(0.0, 1, 1.0) - 0.5).abs() < 1e-12);
        assert!((running_mean(2.0, 2, 5.0) - 3.0).abs() < 1e-12);
        assert!((running_mean(4.0, 3, 0.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_short_sequence() {
        let oracle = ScriptedOracle::constant(-23.0);
        let seq = "acgtac"; // shorter than one window
        let outcome =
            design_probes(seq, "short", &params(20, 2, 4), MaskSet::new(seq.len()), &oracle)
                .unwrap();
        assert!(outcome.probes.is_empty());
        assert!(outcome.score.is_infinite());
    }

    #[test]
    fn test_end_to_end_fixed() {
        let oracle = ScriptedOracle::constant(-24.0);
        let seq = "acgtacgtacgtacgtacgt"; // 20 bases
        let outcome = design_probes(seq, "run", &params(4, 2, 3), MaskSet::new(seq.len()), &oracle)
            .unwrap();
        // gap 6: three probes fit comfortably in 17 start positions
        assert_eq!(outcome.probes.len(), 3);
        assert!((outcome.score - 1.0).abs() < 1e-12);
        for pair in outcome.probes.windows(2) {
            assert!(pair[1].position - pair[0].position >= 6);
        }
        assert_eq!(outcome.probes[0].name, "run_1");
    }

    #[test]
    fn test_masked_region_avoided() {
        let oracle = ScriptedOracle::constant(-24.0);
        let seq = "aaaaaaaaaaaaaaaaaaaa";
        let mut mask = MaskSet::new(seq.len());
        // Mask the first twelve bases: the only usable length-4 windows
        // start at 12..=16
        let mut flags = vec![1u32; 12];
        flags.extend(vec![0u32; 8]);
        mask.add_source(&flags, 'R', seq);

        let outcome = design_probes(seq, "masked", &params(4, 2, 4), mask, &oracle).unwrap();
        assert!(!outcome.probes.is_empty());
        for probe in &outcome.probes {
            assert!(probe.position >= 12, "probe in masked region: {probe:?}");
        }
        // The repeat overlay plus the feasibility overlay
        assert_eq!(outcome.overlays.len(), 2);
    }

    #[test]
    fn test_junction_markers_disqualify_windows() {
        let oracle = ScriptedOracle::constant(-24.0);
        let seq = "aaaa>aaaa";
        let outcome =
            design_probes(seq, "junction", &params(4, 0, 2), MaskSet::new(seq.len()), &oracle)
                .unwrap();
        // Windows 1..=4 straddle the marker; only starts 0 and 5 are usable
        assert_eq!(outcome.probes.len(), 2);
        assert_eq!(outcome.probes[0].position, 0);
        assert_eq!(outcome.probes[1].position, 5);
    }

    #[test]
    fn test_end_to_end_mixed() {
        let oracle = ScriptedOracle::constant(-24.0);
        let seq = "acgtacgtacgtacgtacgtacgt";
        let p = DesignParams {
            mixed_lengths: Some((4, 6)),
            ..params(4, 2, 3)
        };
        let outcome = design_probes(seq, "mix", &p, MaskSet::new(seq.len()), &oracle).unwrap();
        assert_eq!(outcome.probes.len(), 3);
        for probe in &outcome.probes {
            assert!((4..=6).contains(&probe.length));
        }
        for pair in outcome.probes.windows(2) {
            let prev_end = pair[0].position + pair[0].length - 1;
            assert!(pair[1].position >= prev_end + 1 + 2);
        }
    }
}
