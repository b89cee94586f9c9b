//! Dbtune RL - the learning side of the autotuner
//!
//! This crate provides the agent boundary, a default linear policy,
//! the action-to-knob projection, and the episode training loop that
//! drives the environment gateway.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod agent;
pub mod policy;
pub mod projector;
pub mod replay;
pub mod trainer;

pub use agent::LearningAgent;
pub use policy::{LinearPolicy, PolicyConfig};
pub use projector::{project_actions, DEFAULT_ACTION_SCALE};
pub use replay::{ReplayBuffer, Transition};
pub use trainer::{EpisodeReport, Trainer, TrainerConfig, TrainingReport};
