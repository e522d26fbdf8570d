//! Badness scoring: candidate windows to scalar costs.
//!
//! Every candidate probe window gets a cost equal to the squared deviation of
//! its free energy from the target. Windows that cannot be used — invalid
//! characters, oracle failures, free energy outside the allowable range — are
//! disqualified with an infinite cost, never an error.

use crate::core::sequence::has_invalid_chars;
use crate::thermo::ThermoModel;

/// Sentinel cost for an unusable window. Comparisons are strict `<`, so a
/// disqualified window can never displace a finite one.
pub const DISQUALIFIED: f64 = f64::INFINITY;

/// Return the allowable range with its endpoints in ascending order.
///
/// Callers may supply the range either way around; results must not depend
/// on the order given.
#[must_use]
pub fn canonical_range(range: (f64, f64)) -> (f64, f64) {
    if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    }
}

/// Cost of one window, or [`DISQUALIFIED`].
fn window_cost(
    window: &str,
    target_gibbs: f64,
    (min_gibbs, max_gibbs): (f64, f64),
    thermo: &dyn ThermoModel,
) -> f64 {
    if has_invalid_chars(window) {
        return DISQUALIFIED;
    }

    // Oracle failures (unsupported steps) disqualify rather than propagate
    let Ok(gibbs) = thermo.free_energy(window) else {
        return DISQUALIFIED;
    };

    if gibbs < min_gibbs || gibbs > max_gibbs {
        return DISQUALIFIED;
    }

    (gibbs - target_gibbs).powi(2)
}

/// Score every fixed-length window of the sequence.
///
/// Returns one cost per start position, `len(seq) - oligo_len + 1` entries;
/// empty when the sequence is shorter than one window.
#[must_use]
pub fn score_fixed(
    seq: &str,
    oligo_len: usize,
    target_gibbs: f64,
    allowable_gibbs: (f64, f64),
    thermo: &dyn ThermoModel,
) -> Vec<f64> {
    let range = canonical_range(allowable_gibbs);
    let n_starts = (seq.len() + 1).saturating_sub(oligo_len);

    (0..n_starts)
        .map(|i| window_cost(&seq[i..i + oligo_len], target_gibbs, range, thermo))
        .collect()
}

/// Dense cost table for mixed-length scoring, indexed by start position and
/// window length. Stored as a flat row-major array.
#[derive(Debug, Clone)]
pub struct CostGrid {
    costs: Vec<f64>,
    n_starts: usize,
    min_len: usize,
    max_len: usize,
}

impl CostGrid {
    /// All-disqualified grid covering starts `0..n_starts` and lengths
    /// `min_len..=max_len`.
    #[must_use]
    pub fn new(n_starts: usize, min_len: usize, max_len: usize) -> Self {
        let n_lengths = max_len - min_len + 1;
        Self {
            costs: vec![DISQUALIFIED; n_starts * n_lengths],
            n_starts,
            min_len,
            max_len,
        }
    }

    fn index(&self, start: usize, length: usize) -> usize {
        debug_assert!(start < self.n_starts);
        debug_assert!((self.min_len..=self.max_len).contains(&length));
        start * self.n_lengths() + (length - self.min_len)
    }

    #[must_use]
    pub fn get(&self, start: usize, length: usize) -> f64 {
        self.costs[self.index(start, length)]
    }

    pub fn set(&mut self, start: usize, length: usize, cost: f64) {
        let idx = self.index(start, length);
        self.costs[idx] = cost;
    }

    /// Raise the cost at `(start, length)` to [`DISQUALIFIED`]. Overrides
    /// only ever disqualify; they never lower a cost.
    pub fn disqualify(&mut self, start: usize, length: usize) {
        self.set(start, length, DISQUALIFIED);
    }

    #[must_use]
    pub fn n_starts(&self) -> usize {
        self.n_starts
    }

    #[must_use]
    pub fn n_lengths(&self) -> usize {
        self.max_len - self.min_len + 1
    }

    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// True when at least one length yields a finite cost at this start.
    #[must_use]
    pub fn any_usable_at(&self, start: usize) -> bool {
        (self.min_len..=self.max_len).any(|len| self.get(start, len).is_finite())
    }
}

/// Score every (start, length) window for lengths in `[min_len, max_len]`.
///
/// Entries whose window would run past the end of the sequence stay
/// disqualified. The caller guarantees `min_len <= max_len`.
#[must_use]
pub fn score_mixed(
    seq: &str,
    min_len: usize,
    max_len: usize,
    target_gibbs: f64,
    allowable_gibbs: (f64, f64),
    thermo: &dyn ThermoModel,
) -> CostGrid {
    let range = canonical_range(allowable_gibbs);
    let n_starts = (seq.len() + 1).saturating_sub(min_len);
    let mut grid = CostGrid::new(n_starts, min_len, max_len);

    for start in 0..n_starts {
        for length in min_len..=max_len {
            if start + length > seq.len() {
                continue; // stays disqualified
            }
            let cost = window_cost(&seq[start..start + length], target_gibbs, range, thermo);
            grid.set(start, length, cost);
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::tests::ScriptedOracle;
    use crate::thermo::RnaDnaHybrid;

    #[test]
    fn test_canonical_range() {
        assert_eq!(canonical_range((-26.0, -20.0)), (-26.0, -20.0));
        assert_eq!(canonical_range((-20.0, -26.0)), (-26.0, -20.0));
    }

    #[test]
    fn test_badness_formula() {
        // Windows of length 2 scripted to -24.0: cost = (-24 + 23)^2 = 1.0
        let oracle = ScriptedOracle::constant(-24.0);
        let costs = score_fixed("acgt", 2, -23.0, (-26.0, -20.0), &oracle);
        assert_eq!(costs.len(), 3);
        for c in &costs {
            assert!((c - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_disqualified() {
        let oracle = ScriptedOracle::constant(-18.0);
        let costs = score_fixed("acgt", 2, -23.0, (-26.0, -20.0), &oracle);
        assert!(costs.iter().all(|c| c.is_infinite()));
    }

    #[test]
    fn test_reversed_range_equivalent() {
        let oracle = ScriptedOracle::constant(-24.0);
        let forward = score_fixed("acgtacgt", 3, -23.0, (-26.0, -20.0), &oracle);
        let reversed = score_fixed("acgtacgt", 3, -23.0, (-20.0, -26.0), &oracle);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_invalid_chars_disqualified() {
        let oracle = ScriptedOracle::constant(-23.0);
        let costs = score_fixed("acn>t", 2, -23.0, (-26.0, -20.0), &oracle);
        // windows: ac, cn, n>, >t — only "ac" is clean
        assert!(costs[0].is_finite());
        assert!(costs[1].is_infinite());
        assert!(costs[2].is_infinite());
        assert!(costs[3].is_infinite());
    }

    #[test]
    fn test_oracle_failure_disqualifies() {
        // An oracle failure on an otherwise clean window must disqualify it
        // silently, not propagate
        let oracle = ScriptedOracle::constant(-23.0).failing_on("cg");
        let costs = score_fixed("acgt", 2, -23.0, (-26.0, -20.0), &oracle);
        assert!(costs[0].is_finite());
        assert!(costs[1].is_infinite());
        assert!(costs[2].is_finite());
    }

    #[test]
    fn test_real_model_scores_clean_windows() {
        let model = RnaDnaHybrid::default();
        let costs = score_fixed("aaaaa", 2, 0.0, (-100.0, 100.0), &model);
        assert_eq!(costs.len(), 4);
        assert!(costs.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_short_sequence_empty_table() {
        let oracle = ScriptedOracle::constant(-23.0);
        let costs = score_fixed("ac", 20, -23.0, (-26.0, -20.0), &oracle);
        assert!(costs.is_empty());
    }

    #[test]
    fn test_mixed_grid_shape_and_bounds() {
        let oracle = ScriptedOracle::constant(-23.0);
        let grid = score_mixed("acgtacgt", 3, 5, -23.0, (-26.0, -20.0), &oracle);
        assert_eq!(grid.n_starts(), 6);
        assert_eq!(grid.n_lengths(), 3);
        // start 5, length 4 would end at 9 > 8: out of bounds
        assert!(grid.get(5, 3).is_finite());
        assert!(grid.get(5, 4).is_infinite());
        assert!(grid.get(5, 5).is_infinite());
    }

    #[test]
    fn test_mixed_cost_value() {
        let oracle = ScriptedOracle::constant(-24.0);
        let grid = score_mixed("acgtacgt", 3, 4, -23.0, (-26.0, -20.0), &oracle);
        assert!((grid.get(0, 3) - 1.0).abs() < 1e-12);
        assert!((grid.get(0, 4) - 1.0).abs() < 1e-12);
    }
}
