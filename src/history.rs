//! Per-run observation arrays and derived aggregates.

use serde::{Deserialize, Serialize};

/// Complete record of one experiment run.
///
/// Time-indexed arrays are laid out bandit-major: `rewards[k][t]` is the
/// increment recorded for bandit `k` at step `t`. Exactly one bandit is
/// touched per step, so every column of `choices` is one-hot and at most
/// one of `rewards[..][t]` / `penalties[..][t]` is nonzero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    /// Damped success increments, `num_bandits x steps`.
    pub rewards: Vec<Vec<f64>>,
    /// Damped failure increments, `num_bandits x steps`.
    pub penalties: Vec<Vec<f64>>,
    /// One-hot selection indicators, `num_bandits x steps`.
    pub choices: Vec<Vec<u8>>,
    /// Instantaneous regret per step.
    pub regret: Vec<f64>,
    /// Running sum of `rewards` along the time axis, per bandit.
    pub cumsum_rewards: Vec<Vec<f64>>,
    /// Running sum of `penalties` along the time axis, per bandit.
    pub cumsum_penalties: Vec<Vec<f64>>,
    /// Cross-bandit sum of `cumsum_rewards` at each step.
    pub total_rewards: Vec<f64>,
}

impl RunHistory {
    /// All-zero arrays for a run of `steps` rounds over `num_bandits` arms.
    /// Derived arrays stay empty until [`finalize`](Self::finalize).
    pub(crate) fn zeroed(num_bandits: usize, steps: usize) -> Self {
        Self {
            rewards: vec![vec![0.0; steps]; num_bandits],
            penalties: vec![vec![0.0; steps]; num_bandits],
            choices: vec![vec![0; steps]; num_bandits],
            regret: vec![0.0; steps],
            cumsum_rewards: Vec::new(),
            cumsum_penalties: Vec::new(),
            total_rewards: Vec::new(),
        }
    }

    /// Compute the derived arrays from the recorded increments.
    pub(crate) fn finalize(&mut self) {
        self.cumsum_rewards = self.rewards.iter().map(|row| running_sum(row)).collect();
        self.cumsum_penalties = self.penalties.iter().map(|row| running_sum(row)).collect();

        let steps = self.regret.len();
        self.total_rewards = (0..steps)
            .map(|t| self.cumsum_rewards.iter().map(|row| row[t]).sum())
            .collect();
    }

    /// Number of bandit arms this run tracked.
    #[must_use]
    pub fn num_bandits(&self) -> usize {
        self.choices.len()
    }

    /// Number of rounds this run executed.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.regret.len()
    }

    /// Index of the bandit chosen at step `t`, if `t` is in range.
    #[must_use]
    pub fn chosen_bandit(&self, t: usize) -> Option<usize> {
        if t >= self.steps() {
            return None;
        }
        self.choices.iter().position(|row| row[t] != 0)
    }

    /// How many times each bandit was selected across the run.
    #[must_use]
    pub fn selection_counts(&self) -> Vec<u64> {
        self.choices
            .iter()
            .map(|row| row.iter().map(|&c| u64::from(c)).sum())
            .collect()
    }

    /// Running sum of instantaneous regret.
    #[must_use]
    pub fn cumulative_regret(&self) -> Vec<f64> {
        running_sum(&self.regret)
    }

    /// System-wide cumulative reward at the final step.
    #[must_use]
    pub fn final_total_reward(&self) -> f64 {
        self.total_rewards.last().copied().unwrap_or_default()
    }
}

fn running_sum(values: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    values
        .iter()
        .map(|&v| {
            acc += v;
            acc
        })
        .collect()
}

/// Aggregate snapshot of a completed run, for reporting and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub num_bandits: usize,
    pub steps: usize,
    /// Selection count per bandit.
    pub selection_counts: Vec<u64>,
    /// Selection count per bandit divided by `steps`.
    pub selection_rates: Vec<f64>,
    /// Posterior mean per bandit at the end of the run.
    pub posterior_means: Vec<f64>,
    /// Most frequently selected bandit, lowest index on ties.
    pub most_selected: usize,
    /// System-wide cumulative reward at the final step.
    pub total_reward: f64,
    /// Cumulative regret at the final step.
    pub cumulative_regret: f64,
}
