//! Dbtune Env - the environment boundary of the autotuner
//!
//! This crate owns everything that touches the remote tuning target:
//! the gateway trait with its live (HTTP) and no-op (dry-run)
//! implementations, plus the reward shaping that turns telemetry into
//! a training signal.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod gateway;
pub mod http;
pub mod noop;
pub mod reward;

pub use gateway::{EnvironmentGateway, StepObservation};
pub use http::HttpGateway;
pub use noop::NoopGateway;
pub use reward::{shaped_reward, EpisodeContext};
