//! Experiment configuration and fail-fast validation.

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};

/// Construction parameters for a [`BanditExperiment`](crate::BanditExperiment).
///
/// Plain data with serde defaults; nothing is checked until
/// [`validate`](Self::validate) runs, which `BanditExperiment::new` does on
/// every construction. Deserialized configs fall back to the same defaults
/// as [`new`](Self::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// True success probability per bandit, each in `[0, 1]`.
    pub success_probs: Vec<f64>,

    /// Number of sequential rounds per run.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Scale factor in `[0, 1]` applied to each recorded success.
    #[serde(default = "default_damping")]
    pub alpha_damping: f64,

    /// Scale factor in `[0, 1]` applied to each recorded failure.
    #[serde(default = "default_damping")]
    pub beta_damping: f64,

    /// Per-bandit success pseudo-counts added to the Beta prior.
    /// `None` means all ones.
    #[serde(default)]
    pub alpha_init: Option<Vec<f64>>,

    /// Per-bandit failure pseudo-counts added to the Beta prior.
    /// `None` means all ones.
    #[serde(default)]
    pub beta_init: Option<Vec<f64>>,

    /// Clamp sampled posterior values to a minimum floor.
    #[serde(default)]
    pub optimistic: bool,

    /// Floor applied to sampled values when `optimistic` is set, in `[0, 1)`.
    #[serde(default = "default_optimistic_threshold")]
    pub optimistic_threshold: f64,
}

fn default_steps() -> usize {
    1000
}

fn default_damping() -> f64 {
    1.0
}

fn default_optimistic_threshold() -> f64 {
    1e-6
}

impl ExperimentConfig {
    /// Configuration with the given success probabilities and default
    /// everything else: 1000 steps, undamped updates, all-ones priors,
    /// optimistic clamping off.
    #[must_use]
    pub fn new(success_probs: impl Into<Vec<f64>>) -> Self {
        Self {
            success_probs: success_probs.into(),
            steps: default_steps(),
            alpha_damping: default_damping(),
            beta_damping: default_damping(),
            alpha_init: None,
            beta_init: None,
            optimistic: false,
            optimistic_threshold: default_optimistic_threshold(),
        }
    }

    /// Number of bandits described by this configuration.
    #[must_use]
    pub fn num_bandits(&self) -> usize {
        self.success_probs.len()
    }

    /// Check every construction constraint, failing closed on the first
    /// violation. The threshold is checked even when `optimistic` is off so
    /// a dormant config cannot carry an invalid floor.
    pub fn validate(&self) -> Result<()> {
        if self.success_probs.is_empty() {
            return Err(BanditError::InvalidParameter(
                "success_probs must contain at least one bandit".to_string(),
            ));
        }
        for (k, &p) in self.success_probs.iter().enumerate() {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(BanditError::InvalidParameter(format!(
                    "success_probs[{k}] must be in [0, 1], got {p}"
                )));
            }
        }
        if self.steps == 0 {
            return Err(BanditError::InvalidParameter(
                "steps must be at least 1".to_string(),
            ));
        }
        check_damping("alpha_damping", self.alpha_damping)?;
        check_damping("beta_damping", self.beta_damping)?;
        self.check_init("alpha_init", self.alpha_init.as_deref())?;
        self.check_init("beta_init", self.beta_init.as_deref())?;
        let threshold = self.optimistic_threshold;
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(BanditError::InvalidParameter(format!(
                "optimistic_threshold must be in [0, 1), got {threshold}"
            )));
        }
        Ok(())
    }

    fn check_init(&self, name: &str, init: Option<&[f64]>) -> Result<()> {
        let Some(init) = init else {
            return Ok(());
        };
        if init.len() != self.success_probs.len() {
            return Err(BanditError::InvalidParameter(format!(
                "{name} has length {}, expected {} to match success_probs",
                init.len(),
                self.success_probs.len()
            )));
        }
        for (k, &v) in init.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(BanditError::InvalidParameter(format!(
                    "{name}[{k}] must be non-negative and finite, got {v}"
                )));
            }
        }
        Ok(())
    }
}

fn check_damping(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(BanditError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}
