//! Design run parameters and fail-fast validation.

use thiserror::Error;

/// Parameters for one probe design run.
///
/// The optimizer core assumes these have been validated; `validate` is called
/// at the CLI boundary before any sequence is read.
#[derive(Debug, Clone)]
pub struct DesignParams {
    /// Maximum number of probes to place (solutions are produced for every
    /// count from 1 up to this)
    pub n_probes: usize,

    /// Probe length when designing at a single fixed length
    pub oligo_len: usize,

    /// Minimum number of unused bases between consecutive probes
    pub spacer_len: usize,

    /// Target hybrid free energy in kcal/mol
    pub target_gibbs: f64,

    /// Closed allowable free-energy range; endpoints may be given in either
    /// order and are canonicalized by the scorer
    pub allowable_gibbs: (f64, f64),

    /// When set, design probes of every length in `[min, max]` instead of
    /// the fixed `oligo_len`
    pub mixed_lengths: Option<(usize, usize)>,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            n_probes: 48,
            oligo_len: 20,
            spacer_len: 2,
            target_gibbs: -23.0,
            allowable_gibbs: (-26.0, -20.0),
            mixed_lengths: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("probe count must be at least 1")]
    NoProbes,

    #[error("oligo length {0} is too short: at least 2 bases required")]
    OligoTooShort(usize),

    #[error("invalid length range: min {min} exceeds max {max}")]
    InvertedLengthRange { min: usize, max: usize },
}

impl DesignParams {
    /// Check the configuration before entering the optimizer.
    ///
    /// The free-energy range is deliberately not checked here: the scorer
    /// canonicalizes reversed endpoints. The length range is not
    /// canonicalized, so a reversed one is rejected.
    ///
    /// # Errors
    ///
    /// Returns a `ParamsError` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.n_probes == 0 {
            return Err(ParamsError::NoProbes);
        }
        match self.mixed_lengths {
            Some((min, max)) => {
                if min > max {
                    return Err(ParamsError::InvertedLengthRange { min, max });
                }
                if min < 2 {
                    return Err(ParamsError::OligoTooShort(min));
                }
            }
            None => {
                if self.oligo_len < 2 {
                    return Err(ParamsError::OligoTooShort(self.oligo_len));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(DesignParams::default().validate().is_ok());
    }

    #[test]
    fn test_zero_probes_rejected() {
        let params = DesignParams {
            n_probes: 0,
            ..DesignParams::default()
        };
        assert!(matches!(params.validate(), Err(ParamsError::NoProbes)));
    }

    #[test]
    fn test_single_base_oligo_rejected() {
        let params = DesignParams {
            oligo_len: 1,
            ..DesignParams::default()
        };
        assert!(matches!(params.validate(), Err(ParamsError::OligoTooShort(1))));
    }

    #[test]
    fn test_inverted_length_range_rejected() {
        let params = DesignParams {
            mixed_lengths: Some((22, 18)),
            ..DesignParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvertedLengthRange { min: 22, max: 18 })
        ));
    }

    #[test]
    fn test_mixed_range_valid() {
        let params = DesignParams {
            mixed_lengths: Some((18, 22)),
            ..DesignParams::default()
        };
        assert!(params.validate().is_ok());
    }
}
