//! Telemetry samples and the weighted performance score

use serde::{Deserialize, Serialize};

/// Weight of throughput in the combined score and the total reward.
pub const THROUGHPUT_WEIGHT: f64 = 0.6;
/// Weight of latency in the combined score and the total reward.
pub const LATENCY_WEIGHT: f64 = 0.4;

/// A single latency/throughput telemetry read.
///
/// Zero values are well-defined inputs for reward shaping, not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub latency: f64,
    pub throughput: f64,
}

/// Combined performance score of a sample.
///
/// Latency enters un-inverted here: higher latency raises the score.
/// The baseline comparison depends on exactly this form.
pub fn weighted_score(sample: &MetricSample) -> f64 {
    THROUGHPUT_WEIGHT * sample.throughput + LATENCY_WEIGHT * sample.latency
}
