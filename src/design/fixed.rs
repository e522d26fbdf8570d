//! Fixed-length placement optimizer.
//!
//! Dynamic program over start positions. For every probe count k = 1..N it
//! finds the placement set minimizing the mean window cost, subject to
//! consecutive starts being at least `oligo_len + spacer_len` apart.
//!
//! Two flat tables indexed `[position][slot]` hold the running best mean and
//! a backpointer to the start of the last probe achieving it. The best value
//! at position x starts as the best at x - 1 and is only replaced by a
//! strictly better placement at x, so ties resolve to the first solution
//! found and the optimum never gets worse as x grows.

use tracing::debug;

use super::{running_mean, VALIDITY_THRESHOLD};
use crate::core::probe::{Placement, Solution};

/// Find the best probe sets for every count 1..=n_probes.
///
/// `costs` has one entry per start position (infinite = unusable). Returns
/// one [`Solution`] per successful count, in increasing count order; counts
/// whose best mean is at or above the validity threshold are dropped.
#[must_use]
pub fn find_best_placements(
    costs: &[f64],
    oligo_len: usize,
    spacer_len: usize,
    n_probes: usize,
) -> Vec<Solution> {
    let n_starts = costs.len();
    if n_starts == 0 || n_probes == 0 {
        return Vec::new();
    }

    let gap = oligo_len + spacer_len;

    // scores[x * n_probes + k]: best mean for k+1 probes ending at or before x
    // back[..]: start of the last probe in that solution
    let mut scores = vec![f64::INFINITY; n_starts * n_probes];
    let mut back: Vec<Option<usize>> = vec![None; n_starts * n_probes];

    for x in 0..n_starts {
        // Carry forward the best seen so far
        if x > 0 {
            for k in 0..n_probes {
                scores[x * n_probes + k] = scores[(x - 1) * n_probes + k];
                back[x * n_probes + k] = back[(x - 1) * n_probes + k];
            }
        }

        // Try placing a probe starting at x for every slot
        for k in 0..n_probes {
            let candidate = if k == 0 {
                costs[x]
            } else if x >= gap && back[(x - gap) * n_probes + k - 1].is_some() {
                running_mean(scores[(x - gap) * n_probes + k - 1], k, costs[x])
            } else {
                f64::INFINITY
            };

            if candidate < scores[x * n_probes + k] {
                scores[x * n_probes + k] = candidate;
                back[x * n_probes + k] = Some(x);
            }
        }
    }

    // Backtrack each successful slot
    let last = n_starts - 1;
    let mut solutions = Vec::new();

    for k in 0..n_probes {
        if back[last * n_probes + k].is_none() {
            continue;
        }
        let score = scores[last * n_probes + k];
        if score >= VALIDITY_THRESHOLD {
            continue;
        }

        let mut starts = Vec::with_capacity(k + 1);
        let mut x = last;
        let mut slot = k;
        for _ in 0..=k {
            let Some(start) = back[x * n_probes + slot] else {
                break;
            };
            starts.push(start);
            if slot == 0 {
                break;
            }
            // slot > 0 entries are only ever created with start >= gap
            x = start - gap;
            slot -= 1;
        }
        starts.reverse();

        solutions.push(Solution {
            score,
            placements: starts
                .into_iter()
                .map(|start| Placement {
                    start,
                    length: oligo_len,
                })
                .collect(),
        });
    }

    debug!(
        counts = solutions.len(),
        max_requested = n_probes,
        "fixed-length optimizer finished"
    );

    solutions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(solution: &Solution) -> Vec<usize> {
        solution.placements.iter().map(|p| p.start).collect()
    }

    #[test]
    fn test_worked_example() {
        // oligo 3, spacer 1 => gap 4
        let costs = [5.0, 1.0, 2.0, 9.0, 2.0, 0.0, 3.0];
        let solutions = find_best_placements(&costs, 3, 1, 2);

        assert_eq!(solutions.len(), 2);

        assert_eq!(starts(&solutions[0]), vec![5]);
        assert!((solutions[0].score - 0.0).abs() < 1e-12);

        assert_eq!(starts(&solutions[1]), vec![1, 5]);
        assert!((solutions[1].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_spacing_invariant() {
        let costs: Vec<f64> = (0..40).map(|i| f64::from(i % 7)).collect();
        let solutions = find_best_placements(&costs, 5, 2, 6);
        assert!(!solutions.is_empty());
        for solution in &solutions {
            let s = starts(solution);
            for pair in s.windows(2) {
                assert!(pair[1] - pair[0] >= 7, "starts too close: {pair:?}");
            }
        }
    }

    #[test]
    fn test_mean_invariant() {
        let costs = [5.0, 1.0, 2.0, 9.0, 2.0, 0.0, 3.0, 4.0, 1.5];
        let solutions = find_best_placements(&costs, 2, 1, 3);
        for solution in &solutions {
            let mean: f64 = starts(solution).iter().map(|&s| costs[s]).sum::<f64>()
                / solution.probe_count() as f64;
            assert!((solution.score - mean).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_costs() {
        assert!(find_best_placements(&[], 20, 2, 4).is_empty());
    }

    #[test]
    fn test_all_disqualified() {
        let costs = [f64::INFINITY; 10];
        assert!(find_best_placements(&costs, 3, 1, 3).is_empty());
    }

    #[test]
    fn test_threshold_filters_astronomical_solutions() {
        let costs = [2_000_000.0, 3_000_000.0];
        assert!(find_best_placements(&costs, 1, 0, 1).is_empty());
    }

    #[test]
    fn test_disqualified_never_enters_mean() {
        // Position 1 is the only finite cost; the 1-probe solution must use
        // it and no 2-probe solution can exist
        let costs = [f64::INFINITY, 4.0, f64::INFINITY, f64::INFINITY, f64::INFINITY];
        let solutions = find_best_placements(&costs, 2, 1, 2);
        assert_eq!(solutions.len(), 1);
        assert_eq!(starts(&solutions[0]), vec![1]);
        assert!((solutions[0].score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_determinism_first_found_wins() {
        // Two equal-cost positions: strict less-than keeps the earlier one
        let costs = [1.0, 1.0, 1.0];
        let a = find_best_placements(&costs, 2, 0, 1);
        let b = find_best_placements(&costs, 2, 0, 1);
        assert_eq!(a, b);
        assert_eq!(starts(&a[0]), vec![0]);
    }
}
