//! Beta posterior arithmetic for Bernoulli bandit arms.

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};

/// Beta distribution pseudo-counts for one bandit arm.
///
/// `alpha` counts observed successes, `beta` observed failures, each on top
/// of whatever prior the experiment folded in. Sampling draws one value from
/// `Beta(alpha, beta)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPosterior {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for BetaPosterior {
    /// Uniform `Beta(1, 1)` prior.
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl BetaPosterior {
    #[must_use]
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Draw one sample from `Beta(alpha, beta)`.
    ///
    /// Degenerate parameters (zero, negative, or non-finite pseudo-counts)
    /// surface as [`BanditError::Sampling`] rather than a fallback value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err(BanditError::Sampling(format!(
                "Beta({}, {}) has non-finite parameters",
                self.alpha, self.beta
            )));
        }
        let dist = Beta::new(self.alpha, self.beta).map_err(|err| {
            BanditError::Sampling(format!(
                "Beta({}, {}) is not sampleable: {err}",
                self.alpha, self.beta
            ))
        })?;
        Ok(dist.sample(rng))
    }

    /// Expected success probability under this posterior.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}
