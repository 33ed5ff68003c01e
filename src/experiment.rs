//! Thompson sampling experiment driver.
//!
//! `BanditExperiment` owns the per-bandit belief state and runs the
//! sequential decision loop: sample every posterior, play the arm with the
//! highest draw, observe a Bernoulli reward, fold the observation back into
//! the posterior, repeat for the configured number of steps.

use rand::Rng;
use rand::distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ExperimentConfig;
use crate::error::{BanditError, Result};
use crate::history::{ExperimentSummary, RunHistory};
use crate::posterior::BetaPosterior;

/// Outcome of pulling one bandit arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Success,
    Failure,
}

impl Reward {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// A Thompson sampling run over a fixed set of Bernoulli bandits.
///
/// Construction validates the configuration and resolves the priors; the
/// experiment then sits in the unrun state ([`history`](Self::history)
/// returns `None`) until [`run_experiment`](Self::run_experiment) completes.
/// Re-running discards the previous results entirely.
#[derive(Debug, Clone)]
pub struct BanditExperiment {
    config: ExperimentConfig,
    alpha_init: Vec<f64>,
    beta_init: Vec<f64>,
    max_prob: f64,
    reward_totals: Vec<f64>,
    penalty_totals: Vec<f64>,
    history: Option<RunHistory>,
}

impl BanditExperiment {
    /// Validate `config` and set up an unrun experiment.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let n = config.num_bandits();
        let alpha_init = config.alpha_init.clone().unwrap_or_else(|| vec![1.0; n]);
        let beta_init = config.beta_init.clone().unwrap_or_else(|| vec![1.0; n]);
        let max_prob = config
            .success_probs
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            config,
            alpha_init,
            beta_init,
            max_prob,
            reward_totals: vec![0.0; n],
            penalty_totals: vec![0.0; n],
            history: None,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    #[must_use]
    pub fn num_bandits(&self) -> usize {
        self.config.num_bandits()
    }

    /// Best true success probability across all bandits, the baseline for
    /// regret.
    #[must_use]
    pub const fn max_prob(&self) -> f64 {
        self.max_prob
    }

    /// Results of the last completed run, or `None` while unrun.
    #[must_use]
    pub const fn history(&self) -> Option<&RunHistory> {
        self.history.as_ref()
    }

    /// Pull arm `k` once: draw a Bernoulli trial with the arm's true success
    /// probability and return the outcome together with the instantaneous
    /// regret `max_prob - success_probs[k]`.
    ///
    /// Regret is deterministic given `k`; only the reward consumes
    /// randomness. No experiment state changes.
    pub fn draw_bandit<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Result<(Reward, f64)> {
        let p = self.config.success_probs.get(k).copied().ok_or_else(|| {
            BanditError::InvalidParameter(format!(
                "bandit index {k} out of range for {} bandits",
                self.num_bandits()
            ))
        })?;
        let dist = Bernoulli::new(p).map_err(|err| {
            BanditError::Sampling(format!("Bernoulli({p}) is not sampleable: {err}"))
        })?;
        let reward = if dist.sample(rng) {
            Reward::Success
        } else {
            Reward::Failure
        };
        Ok((reward, self.max_prob - p))
    }

    /// Current posterior for every bandit.
    ///
    /// Pseudo-counts follow the `1 + init + observed` convention:
    /// `alpha_k = 1 + alpha_init[k] + sum(rewards[k])` and likewise for
    /// `beta_k` over penalties, so even an all-zero init yields a proper
    /// `Beta(1, 1)` prior.
    #[must_use]
    pub fn posteriors(&self) -> Vec<BetaPosterior> {
        (0..self.num_bandits())
            .map(|k| self.posterior_at(k, &self.reward_totals, &self.penalty_totals))
            .collect()
    }

    /// Posterior mean per bandit, the deterministic counterpart of
    /// [`sample_posteriors`](Self::sample_posteriors).
    #[must_use]
    pub fn posterior_means(&self) -> Vec<f64> {
        self.posteriors().iter().map(BetaPosterior::mean).collect()
    }

    /// Draw one sample from every bandit's posterior, applying the
    /// optimistic floor when configured. Consumes `num_bandits` draws.
    pub fn sample_posteriors<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        self.sample_thetas(&self.reward_totals, &self.penalty_totals, rng)
    }

    /// Select the next bandit to play: sample every posterior and return the
    /// index of the highest draw, lowest index winning ties. No state
    /// mutation.
    pub fn sampling<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let thetas = self.sample_posteriors(rng)?;
        Ok(argmax_first(&thetas))
    }

    /// Run the full decision loop for the configured number of steps.
    ///
    /// Any previous results are discarded before the first step; on success
    /// the experiment holds the finalized [`RunHistory`] and the posteriors
    /// reflect the run's observations. If a draw fails mid-run the
    /// experiment is left unrun, never partially populated.
    pub fn run_experiment<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&RunHistory> {
        let n = self.num_bandits();
        let steps = self.config.steps;
        debug!(
            num_bandits = n,
            steps,
            optimistic = self.config.optimistic,
            "starting experiment run"
        );

        self.history = None;
        self.reward_totals = vec![0.0; n];
        self.penalty_totals = vec![0.0; n];

        // Observations accumulate locally so a failed run cannot leave
        // stale totals behind.
        let mut reward_totals = vec![0.0; n];
        let mut penalty_totals = vec![0.0; n];
        let mut history = RunHistory::zeroed(n, steps);

        for t in 0..steps {
            let thetas = self.sample_thetas(&reward_totals, &penalty_totals, rng)?;
            let k = argmax_first(&thetas);
            let (reward, regret) = self.draw_bandit(k, rng)?;

            history.choices[k][t] = 1;
            history.regret[t] = regret;
            match reward {
                Reward::Success => {
                    history.rewards[k][t] = self.config.alpha_damping;
                    reward_totals[k] += self.config.alpha_damping;
                }
                Reward::Failure => {
                    history.penalties[k][t] = self.config.beta_damping;
                    penalty_totals[k] += self.config.beta_damping;
                }
            }
            trace!(step = t, chosen = k, theta = thetas[k], regret, "step complete");
        }

        history.finalize();
        self.reward_totals = reward_totals;
        self.penalty_totals = penalty_totals;
        debug!(
            total_reward = history.final_total_reward(),
            "experiment run complete"
        );
        Ok(self.history.insert(history))
    }

    /// [`run_experiment`](Self::run_experiment) with the thread-local RNG.
    pub fn run(&mut self) -> Result<&RunHistory> {
        let mut rng = rand::rng();
        self.run_experiment(&mut rng)
    }

    /// Aggregate snapshot of the last completed run, or `None` while unrun.
    #[must_use]
    pub fn summary(&self) -> Option<ExperimentSummary> {
        let history = self.history.as_ref()?;
        let steps = history.steps();
        let selection_counts = history.selection_counts();
        let selection_rates = selection_counts
            .iter()
            .map(|&c| c as f64 / steps as f64)
            .collect();

        let mut most_selected = 0;
        for (k, &count) in selection_counts.iter().enumerate().skip(1) {
            if count > selection_counts[most_selected] {
                most_selected = k;
            }
        }

        Some(ExperimentSummary {
            num_bandits: history.num_bandits(),
            steps,
            selection_counts,
            selection_rates,
            posterior_means: self.posterior_means(),
            most_selected,
            total_reward: history.final_total_reward(),
            cumulative_regret: history
                .cumulative_regret()
                .last()
                .copied()
                .unwrap_or_default(),
        })
    }

    fn posterior_at(
        &self,
        k: usize,
        reward_totals: &[f64],
        penalty_totals: &[f64],
    ) -> BetaPosterior {
        BetaPosterior::new(
            1.0 + self.alpha_init[k] + reward_totals[k],
            1.0 + self.beta_init[k] + penalty_totals[k],
        )
    }

    fn sample_thetas<R: Rng + ?Sized>(
        &self,
        reward_totals: &[f64],
        penalty_totals: &[f64],
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        let mut thetas = Vec::with_capacity(self.num_bandits());
        for k in 0..self.num_bandits() {
            let posterior = self.posterior_at(k, reward_totals, penalty_totals);
            let mut theta = posterior.sample(rng)?;
            if self.config.optimistic {
                theta = theta.max(self.config.optimistic_threshold);
            }
            thetas.push(theta);
        }
        Ok(thetas)
    }
}

/// Index of the maximum value, first occurrence winning ties.
fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}
