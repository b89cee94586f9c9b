//! Reward shaping and per-episode bookkeeping
//!
//! The shaper scores a telemetry sample against both the episode's
//! initial baseline (long-run trend, `delta0`) and the immediately
//! preceding step (short-run trend, `delta_t`). Long-run gains are
//! amplified quadratically; a positive long-run trend earns nothing
//! while the latest step is regressing.

use dbtune_core::{weighted_score, MetricSample, LATENCY_WEIGHT, THROUGHPUT_WEIGHT};

/// Relative change, defined as 0 when the denominator is 0.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Shape one metric's reward from its long-run and short-run deltas.
fn shape(delta0: f64, delta_t: f64) -> f64 {
    let shaped = if delta0 > 0.0 {
        ((1.0 + delta0).powi(2) - 1.0) * (1.0 + delta_t).abs()
    } else {
        -(((1.0 - delta0).powi(2) - 1.0) * (1.0 - delta_t).abs())
    };

    // Damping: a positive shaped value with a regressing latest step
    // is forced to exactly zero.
    if shaped > 0.0 && delta_t < 0.0 {
        0.0
    } else {
        shaped
    }
}

/// Scalar reward for `current`, relative to the episode's `initial`
/// sample and the immediately preceding `previous` sample.
///
/// For throughput, improvement means a higher value; for latency, a
/// lower one, so its deltas are inverted. Every delta with a zero
/// denominator evaluates to 0.
pub fn shaped_reward(
    initial: &MetricSample,
    previous: &MetricSample,
    current: &MetricSample,
) -> f64 {
    let delta0_tps = ratio(current.throughput - initial.throughput, initial.throughput);
    let delta0_latency = ratio(initial.latency - current.latency, current.latency);

    let delta_t_tps = ratio(
        current.throughput - previous.throughput,
        previous.throughput,
    );
    let delta_t_latency = ratio(previous.latency - current.latency, current.latency);

    let tps_shaped = shape(delta0_tps, delta_t_tps);
    let latency_shaped = shape(delta0_latency, delta_t_latency);

    THROUGHPUT_WEIGHT * tps_shaped + LATENCY_WEIGHT * latency_shaped
}

/// Per-episode reward bookkeeping.
///
/// Created fresh at the start of each episode from the first metric
/// sample; the baseline score is computed exactly once from that sample
/// and never recomputed. Nothing here survives an episode, so there is
/// no hidden coupling between consecutive episodes.
#[derive(Debug, Clone)]
pub struct EpisodeContext {
    initial: MetricSample,
    previous: MetricSample,
    baseline_score: f64,
    performance_increased: bool,
}

impl EpisodeContext {
    /// Seed the context from the episode's first sample.
    pub fn new(initial: MetricSample) -> Self {
        let baseline_score = weighted_score(&initial);
        Self {
            previous: initial.clone(),
            initial,
            baseline_score,
            performance_increased: false,
        }
    }

    /// Reward for `current` and baseline comparison.
    ///
    /// Latches `performance_increased` when the weighted score of
    /// `current` exceeds the baseline. The comparison uses raw latency,
    /// not the inverted form that enters the reward - the two are
    /// intentionally different.
    pub fn observe(&mut self, current: &MetricSample) -> f64 {
        if weighted_score(current) > self.baseline_score {
            self.performance_increased = true;
        }
        shaped_reward(&self.initial, &self.previous, current)
    }

    /// Make `current` the reference for the next step's short-run deltas.
    pub fn advance(&mut self, current: MetricSample) {
        self.previous = current;
    }

    pub fn baseline_score(&self) -> f64 {
        self.baseline_score
    }

    /// True once any observed sample beat the baseline; stays true for
    /// the rest of the episode.
    pub fn performance_increased(&self) -> bool {
        self.performance_increased
    }

    pub fn initial(&self) -> &MetricSample {
        &self.initial
    }

    pub fn previous(&self) -> &MetricSample {
        &self.previous
    }
}
