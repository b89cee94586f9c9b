//! Transitions and the experience replay buffer

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A single transition (s, a, r, s')
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub state: Vec<f64>,
    pub action: Vec<f64>,
    pub reward: f64,
    pub next_state: Vec<f64>,
}

/// Bounded FIFO replay buffer with uniform sampling
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    /// Create a new replay buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a transition, evicting the oldest when full
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Sample a batch of transitions uniformly at random
    pub fn sample(&self, batch_size: usize) -> Vec<Transition> {
        let mut rng = rand::thread_rng();
        let transitions: Vec<_> = self.buffer.iter().cloned().collect();
        transitions
            .choose_multiple(&mut rng, batch_size.min(transitions.len()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(reward: f64) -> Transition {
        Transition {
            state: vec![0.1, 0.2],
            action: vec![0.5],
            reward,
            next_state: vec![0.2, 0.3],
        }
    }

    #[test]
    fn test_push_and_len() {
        let mut buffer = ReplayBuffer::new(100);
        assert!(buffer.is_empty());

        buffer.push(transition(1.0));
        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut buffer = ReplayBuffer::new(3);
        for i in 0..5 {
            buffer.push(transition(i as f64));
        }

        assert_eq!(buffer.len(), 3);
        // Oldest two were evicted
        let rewards: Vec<f64> = buffer.sample(3).iter().map(|t| t.reward).collect();
        assert!(rewards.iter().all(|&r| r >= 2.0));
    }

    #[test]
    fn test_sample_size() {
        let mut buffer = ReplayBuffer::new(100);
        for i in 0..10 {
            buffer.push(transition(i as f64));
        }

        assert_eq!(buffer.sample(5).len(), 5);
        // Sampling more than available returns what exists
        assert_eq!(buffer.sample(50).len(), 10);
    }

    #[test]
    fn test_clear() {
        let mut buffer = ReplayBuffer::new(10);
        buffer.push(transition(1.0));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_transition_serialization() {
        let t = transition(0.528);
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Transition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.reward, 0.528);
        assert_eq!(parsed.action, vec![0.5]);
    }
}
