//! Final-solution selection policy.

use crate::core::probe::Solution;

/// Pick the solution to materialize: the one with the greatest probe count.
///
/// More probes are preferred for downstream hybridization robustness even at
/// a slightly worse mean cost; fewer probes are never preferred on cost.
/// The optimizers have already dropped counts above the validity threshold,
/// so everything here is a real solution. Returns `None` when no count
/// succeeded.
#[must_use]
pub fn select_final(solutions: &[Solution]) -> Option<&Solution> {
    solutions.iter().max_by_key(|s| s.probe_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::Placement;

    fn solution(score: f64, starts: &[usize]) -> Solution {
        Solution {
            score,
            placements: starts
                .iter()
                .map(|&start| Placement { start, length: 20 })
                .collect(),
        }
    }

    #[test]
    fn test_greatest_count_wins_regardless_of_cost() {
        let solutions = vec![
            solution(0.1, &[3]),
            solution(0.4, &[3, 30]),
            solution(2.5, &[3, 30, 60]),
        ];
        let best = select_final(&solutions).unwrap();
        assert_eq!(best.probe_count(), 3);
        assert!((best.score - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(select_final(&[]).is_none());
    }

    #[test]
    fn test_selects_two_probes_from_optimizer_output() {
        // End to end over the fixed optimizer: the 1-probe solution is
        // cheaper ([5], mean 0) but the 2-probe solution ([1, 5], mean 0.5)
        // must win on count
        let costs = [5.0, 1.0, 2.0, 9.0, 2.0, 0.0, 3.0];
        let solutions = crate::design::fixed::find_best_placements(&costs, 3, 1, 2);
        let best = select_final(&solutions).unwrap();
        assert_eq!(best.probe_count(), 2);
        let starts: Vec<usize> = best.placements.iter().map(|p| p.start).collect();
        assert_eq!(starts, vec![1, 5]);
        assert!((best.score - 0.5).abs() < 1e-12);
    }
}
