//! Mixed-length placement optimizer.
//!
//! Same objective as the fixed-length variant, but window length is a free
//! variable, so the dynamic program is indexed by *end* position: a probe of
//! any candidate length can end at position e, and chaining only needs the
//! best state at the last unused position before this probe's start. The
//! spacing rule is `next_start - (prev_start + prev_len) >= spacer_len`.

use tracing::debug;

use super::{running_mean, VALIDITY_THRESHOLD};
use crate::core::probe::{Placement, Solution};
use crate::design::badness::CostGrid;

/// Find the best mixed-length probe sets for every count 1..=n_probes.
///
/// `seq_len` is the working-sequence length (end positions run over
/// `0..seq_len`). Result shape matches the fixed-length optimizer, but each
/// placement carries its own length.
#[must_use]
pub fn find_best_placements(
    grid: &CostGrid,
    seq_len: usize,
    spacer_len: usize,
    n_probes: usize,
) -> Vec<Solution> {
    if seq_len == 0 || n_probes == 0 || grid.n_starts() == 0 {
        return Vec::new();
    }

    // scores[e * n_probes + k]: best mean for k+1 probes ending at or before e
    // back[..]: (start, length) of the last probe in that solution
    let mut scores = vec![f64::INFINITY; seq_len * n_probes];
    let mut back: Vec<Option<(usize, usize)>> = vec![None; seq_len * n_probes];

    for e in 0..seq_len {
        // Carry forward from the previous end position
        if e > 0 {
            for k in 0..n_probes {
                if scores[(e - 1) * n_probes + k] < scores[e * n_probes + k] {
                    scores[e * n_probes + k] = scores[(e - 1) * n_probes + k];
                    back[e * n_probes + k] = back[(e - 1) * n_probes + k];
                }
            }
        }

        // Try every candidate length for a probe ending exactly at e
        for length in grid.min_len()..=grid.max_len() {
            if length > e + 1 {
                continue; // start would be negative
            }
            let start = e + 1 - length;
            if start >= grid.n_starts() {
                continue;
            }
            let cost = grid.get(start, length);
            if cost.is_infinite() {
                continue;
            }

            for k in 0..n_probes {
                let candidate = if k == 0 {
                    cost
                } else {
                    // Previous probe must end with spacer_len unused bases
                    // strictly before this start
                    if start < spacer_len + 1 {
                        continue;
                    }
                    let prev_end = start - spacer_len - 1;
                    if back[prev_end * n_probes + k - 1].is_none() {
                        continue;
                    }
                    running_mean(scores[prev_end * n_probes + k - 1], k, cost)
                };

                if candidate < scores[e * n_probes + k] {
                    scores[e * n_probes + k] = candidate;
                    back[e * n_probes + k] = Some((start, length));
                }
            }
        }
    }

    // Backtrack each successful slot from the final end position
    let last = seq_len - 1;
    let mut solutions = Vec::new();

    for k in 0..n_probes {
        if back[last * n_probes + k].is_none() {
            continue;
        }
        let score = scores[last * n_probes + k];
        if score >= VALIDITY_THRESHOLD {
            continue;
        }

        let mut placements = Vec::with_capacity(k + 1);
        let mut e = last;
        let mut slot = k;
        for _ in 0..=k {
            let Some((start, length)) = back[e * n_probes + slot] else {
                break;
            };
            placements.push(Placement { start, length });
            if slot == 0 {
                break;
            }
            // slot > 0 entries are only created with start > spacer_len
            e = start - spacer_len - 1;
            slot -= 1;
        }
        placements.reverse();

        solutions.push(Solution { score, placements });
    }

    debug!(
        counts = solutions.len(),
        max_requested = n_probes,
        "mixed-length optimizer finished"
    );

    solutions
}
