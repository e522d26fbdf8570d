//! Expand a winning solution into fully described probe records.

use crate::core::probe::{Probe, Solution};
use crate::core::sequence::{gc_fraction, reverse_complement, template_window};
use crate::thermo::{ThermoError, ThermoModel};

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Build one [`Probe`] per placement, in increasing position order.
///
/// The probe sequence is the reverse complement of the template window (the
/// probe binds the template, complementary and antiparallel). GC% is
/// computed on the probe sequence; Tm and free energy are evaluated on the
/// template window, the free energy matching the value the scorer used.
///
/// # Errors
///
/// Returns a `ThermoError` only if a winning window cannot be evaluated,
/// which the scorer's disqualification pass rules out by construction.
pub fn materialize(
    seq: &str,
    solution: &Solution,
    run_name: &str,
    thermo: &dyn ThermoModel,
) -> Result<Vec<Probe>, ThermoError> {
    let mut probes = Vec::with_capacity(solution.placements.len());

    for (i, placement) in solution.placements.iter().enumerate() {
        let index = i + 1;
        let template = template_window(seq, placement.start, placement.length);
        let probe_seq = reverse_complement(&template);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Percentage 0-100
        let gc_percent = (gc_fraction(&probe_seq) * 100.0).round() as u32;

        probes.push(Probe {
            index,
            position: placement.start,
            length: probe_seq.len(),
            gc_percent,
            tm: round1(thermo.melting_temp(&template)?),
            gibbs_fe: round1(thermo.free_energy(&template)?),
            sequence: probe_seq,
            name: format!("{run_name}_{index}"),
        });
    }

    Ok(probes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::Placement;
    use crate::thermo::tests::ScriptedOracle;

    #[test]
    fn test_materialize_basic() {
        let seq = "aacctggtta";
        let solution = Solution {
            score: 1.0,
            placements: vec![
                Placement { start: 0, length: 4 },
                Placement { start: 6, length: 4 },
            ],
        };
        let oracle = ScriptedOracle::constant(-22.5);
        let probes = materialize(seq, &solution, "demo", &oracle).unwrap();

        assert_eq!(probes.len(), 2);

        assert_eq!(probes[0].index, 1);
        assert_eq!(probes[0].position, 0);
        assert_eq!(probes[0].sequence, "ggtt"); // revcomp of aacc
        assert_eq!(probes[0].name, "demo_1");
        assert_eq!(probes[0].gc_percent, 50);
        assert!((probes[0].gibbs_fe - (-22.5)).abs() < 1e-12);
        assert!((probes[0].tm - 45.0).abs() < 1e-12);

        assert_eq!(probes[1].index, 2);
        assert_eq!(probes[1].sequence, "taac"); // revcomp of gtta
        assert_eq!(probes[1].name, "demo_2");
    }

    #[test]
    fn test_materialize_skips_junction_markers() {
        let seq = "aac>ctg";
        let solution = Solution {
            score: 0.0,
            placements: vec![Placement { start: 1, length: 4 }],
        };
        let oracle = ScriptedOracle::constant(-23.0);
        let probes = materialize(seq, &solution, "x", &oracle).unwrap();
        // template walks past the marker: a c c t
        assert_eq!(probes[0].sequence, reverse_complement("acct"));
        assert_eq!(probes[0].length, 4);
    }

    #[test]
    fn test_rounding() {
        let seq = "acgtacgt";
        let solution = Solution {
            score: 0.0,
            placements: vec![Placement { start: 0, length: 4 }],
        };
        let oracle = ScriptedOracle::constant(-23.456);
        let probes = materialize(seq, &solution, "r", &oracle).unwrap();
        assert!((probes[0].gibbs_fe - (-23.5)).abs() < 1e-12);
        assert!((probes[0].tm - 46.9).abs() < 1e-12);
    }
}
