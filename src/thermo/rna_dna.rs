//! Nearest-neighbor model for RNA:DNA hybrid duplexes.
//!
//! Parameters follow Sugimoto et al. (1995), measured for RNA/DNA hybrids.
//! Windows are written in DNA letters on the template (RNA-sense) strand, so
//! `t` stands in for `u`; steps are read 5' to 3' along that strand. Each
//! table is indexed `[first base][second base]` in `a c g t` order.

use super::{ThermoError, ThermoModel};

/// Gas constant in cal/(mol K).
const GAS_CONSTANT: f64 = 1.9872;

/// Step free energies at 37C, kcal/mol.
const DELTA_G: [[f64; 4]; 4] = [
    [-1.0, -2.1, -1.8, -0.9],
    [-0.9, -2.1, -1.7, -0.9],
    [-1.3, -2.7, -2.9, -1.1],
    [-0.6, -1.5, -1.6, -0.2],
];

/// Step enthalpies, kcal/mol.
const DELTA_H: [[f64; 4]; 4] = [
    [-7.8, -5.9, -9.1, -8.3],
    [-9.0, -9.3, -16.3, -7.0],
    [-5.5, -8.0, -12.8, -7.8],
    [-7.8, -8.6, -10.4, -11.5],
];

/// Step entropies, cal/(mol K).
const DELTA_S: [[f64; 4]; 4] = [
    [-21.9, -12.3, -23.5, -23.9],
    [-26.1, -23.2, -47.1, -19.7],
    [-13.5, -17.1, -31.9, -21.6],
    [-23.2, -22.9, -28.4, -36.4],
];

/// Duplex initiation terms.
const INIT_G: f64 = 3.1;
const INIT_H: f64 = 1.9;
const INIT_S: f64 = -3.9;

fn base_index(base: char) -> Option<usize> {
    match base {
        'a' => Some(0),
        'c' => Some(1),
        'g' => Some(2),
        't' => Some(3),
        _ => None,
    }
}

/// Sugimoto nearest-neighbor model for a DNA probe hybridizing an RNA target.
#[derive(Debug, Clone)]
pub struct RnaDnaHybrid {
    /// Total strand concentration in mol/L
    pub strand_conc: f64,

    /// Monovalent cation concentration in mol/L
    pub na_conc: f64,
}

impl Default for RnaDnaHybrid {
    fn default() -> Self {
        // 250 nM probe in 2x SSC hybridization buffer
        Self {
            strand_conc: 2.5e-7,
            na_conc: 0.33,
        }
    }
}

impl RnaDnaHybrid {
    /// Sum step parameters over the window, returning totals for
    /// (enthalpy kcal/mol, entropy cal/(mol K), free energy kcal/mol)
    /// including initiation.
    fn sum_steps(&self, window: &str) -> Result<(f64, f64, f64), ThermoError> {
        if window.chars().count() < 2 {
            return Err(ThermoError::WindowTooShort(window.chars().count()));
        }

        let mut dh = INIT_H;
        let mut ds = INIT_S;
        let mut dg = INIT_G;

        let mut chars = window.chars();
        let mut prev = chars.next().ok_or(ThermoError::WindowTooShort(0))?;
        for next in chars {
            let (i, j) = match (base_index(prev), base_index(next)) {
                (Some(i), Some(j)) => (i, j),
                _ => return Err(ThermoError::UnsupportedPair(prev, next)),
            };
            dh += DELTA_H[i][j];
            ds += DELTA_S[i][j];
            dg += DELTA_G[i][j];
            prev = next;
        }

        Ok((dh, ds, dg))
    }
}

impl ThermoModel for RnaDnaHybrid {
    fn free_energy(&self, window: &str) -> Result<f64, ThermoError> {
        let (_, _, dg) = self.sum_steps(window)?;
        Ok(dg)
    }

    fn melting_temp(&self, window: &str) -> Result<f64, ThermoError> {
        let (dh, ds, _) = self.sum_steps(window)?;
        // Two-state Tm with salt correction; dh in kcal/mol, ds in cal/(mol K)
        let tm_kelvin = dh * 1000.0 / (ds + GAS_CONSTANT * (self.strand_conc / 4.0).ln());
        Ok(tm_kelvin + 16.6 * self.na_conc.log10() - 273.15)
    }
}
