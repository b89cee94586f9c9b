//! Gateway trait for the remote tuning target

use async_trait::async_trait;

use dbtune_core::{KnobSpec, KnobValue, MetricSample, Result};

/// What the target reported after one applied configuration.
#[derive(Debug, Clone)]
pub struct StepObservation {
    pub metrics: MetricSample,
    pub next_state: Vec<f64>,
}

/// Request/response boundary to a named target instance.
///
/// All operations are strictly sequential: each call blocks the episode
/// until the remote side answers. `apply_knobs` is assumed synchronous on
/// the remote end - it returns only once the change is observably in
/// effect. Connectivity failures propagate; no retry happens here.
#[async_trait]
pub trait EnvironmentGateway: Send + Sync {
    /// Reset/prepare the remote target for a fresh episode.
    async fn initialize(&self, instance: &str) -> Result<()>;

    /// Current feature vector of the target. Server-defined order,
    /// opaque but stable within an episode.
    async fn read_state(&self, instance: &str) -> Result<Vec<f64>>;

    /// Current latency and throughput.
    async fn read_reward_metrics(&self, instance: &str) -> Result<MetricSample>;

    /// Mutate the remote configuration.
    async fn apply_knobs(&self, instance: &str, knobs: &[KnobValue]) -> Result<()>;

    /// Bounds and current values for the requested knobs.
    async fn read_knob_descriptors(
        &self,
        instance: &str,
        knob_names: &[String],
    ) -> Result<Vec<KnobSpec>>;

    /// Apply a configuration and observe the outcome.
    ///
    /// Returns `None` when the gateway produces no observation, in which
    /// case the step yields no transition. The no-op gateway uses this
    /// for dry runs; the controller never branches on a mode flag.
    async fn step(
        &self,
        instance: &str,
        knobs: &[KnobValue],
    ) -> Result<Option<StepObservation>> {
        self.apply_knobs(instance, knobs).await?;
        let metrics = self.read_reward_metrics(instance).await?;
        let next_state = self.read_state(instance).await?;
        Ok(Some(StepObservation {
            metrics,
            next_state,
        }))
    }
}
