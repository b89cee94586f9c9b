//! Dbtune Core - shared types for the database knob autotuner
//!
//! This crate provides the knob and metric types used across all
//! dbtune components, plus the error taxonomy.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod knob;
pub mod metrics;

pub use error::{Result, TuneError};
pub use knob::{KnobSet, KnobSpec, KnobValue};
pub use metrics::{weighted_score, MetricSample, LATENCY_WEIGHT, THROUGHPUT_WEIGHT};
