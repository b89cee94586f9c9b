//! Boundary to the learning algorithm driving the tuner

use anyhow::Result;

use crate::replay::Transition;

/// Contract between the episode loop and whatever learns from it.
///
/// All three operations are synchronous and side-effect-isolated to the
/// agent's internal model and replay store; the loop treats them as
/// atomic, blocking calls.
pub trait LearningAgent: Send {
    /// Action vector for the given state, one component per knob in
    /// knob-set order. Components are conventionally in [-1, 1] but the
    /// range is not enforced here.
    fn choose_action(&mut self, state: &[f64]) -> Vec<f64>;

    /// Store a transition for later training.
    fn add_transition(&mut self, transition: Transition);

    /// One optimization step over accumulated transitions. Returns the
    /// training loss (0.0 when there is not enough data yet).
    fn update(&mut self) -> Result<f64>;
}
