//! Default linear policy with exploration noise
//!
//! A deliberately small actor: linear map, tanh squash, decaying
//! uniform noise, reward-weighted regression on sampled batches. It
//! exists so the tuner runs out of the box; anything smarter plugs in
//! behind the `LearningAgent` trait.

use anyhow::Result;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::Deserialize;

use crate::agent::LearningAgent;
use crate::replay::{ReplayBuffer, Transition};

/// Policy hyperparameters
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,

    #[serde(default = "default_noise_decay")]
    pub noise_decay: f64,

    #[serde(default = "default_min_noise")]
    pub min_noise: f64,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

fn default_learning_rate() -> f64 {
    0.001
}
fn default_noise_scale() -> f64 {
    0.3
}
fn default_noise_decay() -> f64 {
    0.999
}
fn default_min_noise() -> f64 {
    0.01
}
fn default_batch_size() -> usize {
    32
}
fn default_buffer_capacity() -> usize {
    10000
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            noise_scale: default_noise_scale(),
            noise_decay: default_noise_decay(),
            min_noise: default_min_noise(),
            batch_size: default_batch_size(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

/// Linear actor over the state vector
pub struct LinearPolicy {
    // action_dim x state_dim
    weights: Array2<f64>,
    bias: Array1<f64>,
    noise_scale: f64,
    config: PolicyConfig,
    buffer: ReplayBuffer,
}

impl LinearPolicy {
    pub fn new(state_dim: usize, action_dim: usize, config: PolicyConfig) -> Self {
        Self {
            weights: Array2::zeros((action_dim, state_dim)),
            bias: Array1::zeros(action_dim),
            noise_scale: config.noise_scale,
            buffer: ReplayBuffer::new(config.buffer_capacity),
            config,
        }
    }

    pub fn action_dim(&self) -> usize {
        self.bias.len()
    }

    pub fn noise_scale(&self) -> f64 {
        self.noise_scale
    }

    /// Deterministic part of the policy: tanh(W s + b).
    fn mean_action(&self, state: &[f64]) -> Array1<f64> {
        let raw = if state.len() == self.weights.ncols() {
            self.weights.dot(&Array1::from_vec(state.to_vec())) + &self.bias
        } else {
            // Dimension mismatch (e.g. an empty dry-run state): fall back
            // to the bias alone.
            self.bias.clone()
        };
        raw.mapv(f64::tanh)
    }
}

impl LearningAgent for LinearPolicy {
    fn choose_action(&mut self, state: &[f64]) -> Vec<f64> {
        let mean = self.mean_action(state);
        let mut rng = rand::thread_rng();

        mean.iter()
            .map(|&m| {
                let noise = (rng.gen::<f64>() * 2.0 - 1.0) * self.noise_scale;
                (m + noise).clamp(-1.0, 1.0)
            })
            .collect()
    }

    fn add_transition(&mut self, transition: Transition) {
        self.buffer.push(transition);
    }

    fn update(&mut self) -> Result<f64> {
        if self.buffer.len() < self.config.batch_size {
            return Ok(0.0);
        }

        let batch = self.buffer.sample(self.config.batch_size);
        let mut total_loss = 0.0;
        let mut counted = 0usize;

        for t in &batch {
            if t.state.len() != self.weights.ncols() || t.action.len() != self.bias.len() {
                continue;
            }

            let predicted = self.mean_action(&t.state);
            let lr = self.config.learning_rate * t.reward;

            for i in 0..self.bias.len() {
                let err = t.action[i] - predicted[i];
                total_loss += err * err;

                // Reward-weighted regression: pull the mean action toward
                // rewarded actions, push it away from punished ones.
                self.bias[i] += lr * err;
                for j in 0..self.weights.ncols() {
                    self.weights[[i, j]] += lr * err * t.state[j];
                }
            }
            counted += 1;
        }

        // Noise decays with a floor, so exploration never dies entirely.
        self.noise_scale = (self.noise_scale * self.config.noise_decay).max(self.config.min_noise);

        if counted == 0 {
            return Ok(0.0);
        }
        Ok(total_loss / counted as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_length_matches_action_dim() {
        let mut policy = LinearPolicy::new(4, 3, PolicyConfig::default());
        let action = policy.choose_action(&[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(action.len(), 3);
    }

    #[test]
    fn test_actions_stay_in_unit_range() {
        let config = PolicyConfig {
            noise_scale: 5.0,
            ..PolicyConfig::default()
        };
        let mut policy = LinearPolicy::new(2, 4, config);

        for _ in 0..100 {
            let action = policy.choose_action(&[100.0, -100.0]);
            assert!(action.iter().all(|a| (-1.0..=1.0).contains(a)));
        }
    }

    #[test]
    fn test_empty_state_falls_back_to_bias() {
        let mut policy = LinearPolicy::new(0, 2, PolicyConfig::default());
        let action = policy.choose_action(&[]);
        assert_eq!(action.len(), 2);
    }

    #[test]
    fn test_update_needs_full_batch() {
        let mut policy = LinearPolicy::new(2, 1, PolicyConfig::default());
        policy.add_transition(Transition {
            state: vec![0.1, 0.2],
            action: vec![0.5],
            reward: 1.0,
            next_state: vec![0.2, 0.3],
        });

        let loss = policy.update().unwrap();
        assert_eq!(loss, 0.0);
    }

    #[test]
    fn test_update_reports_loss_and_decays_noise() {
        let config = PolicyConfig {
            batch_size: 4,
            noise_decay: 0.5,
            min_noise: 0.01,
            ..PolicyConfig::default()
        };
        let mut policy = LinearPolicy::new(2, 1, config);
        let noise_before = policy.noise_scale();

        for _ in 0..4 {
            policy.add_transition(Transition {
                state: vec![1.0, 0.0],
                action: vec![0.8],
                reward: 1.0,
                next_state: vec![1.0, 0.0],
            });
        }

        let loss = policy.update().unwrap();
        assert!(loss > 0.0);
        assert!(policy.noise_scale() < noise_before);
    }

    #[test]
    fn test_noise_floor() {
        let config = PolicyConfig {
            batch_size: 1,
            noise_scale: 0.02,
            noise_decay: 0.1,
            min_noise: 0.01,
            ..PolicyConfig::default()
        };
        let mut policy = LinearPolicy::new(1, 1, config);
        policy.add_transition(Transition {
            state: vec![0.0],
            action: vec![0.0],
            reward: 0.0,
            next_state: vec![0.0],
        });

        policy.update().unwrap();
        policy.update().unwrap();
        assert_eq!(policy.noise_scale(), 0.01);
    }
}
