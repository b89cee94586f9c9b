//! No-op gateway for dry runs

use async_trait::async_trait;

use dbtune_core::{KnobSpec, KnobValue, MetricSample, Result};

use crate::gateway::{EnvironmentGateway, StepObservation};

/// Gateway that never contacts a target.
///
/// Selected at construction time for dry runs: every operation returns
/// immediately, and `step` yields no observation, so the control loop
/// produces no transitions. Knob descriptors are synthesized with unit
/// bounds unless presets are supplied.
#[derive(Debug, Default)]
pub struct NoopGateway {
    preset_knobs: Vec<KnobSpec>,
}

impl NoopGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed descriptors instead of synthesized unit-range ones.
    pub fn with_knobs(preset_knobs: Vec<KnobSpec>) -> Self {
        Self { preset_knobs }
    }
}

#[async_trait]
impl EnvironmentGateway for NoopGateway {
    async fn initialize(&self, _instance: &str) -> Result<()> {
        Ok(())
    }

    async fn read_state(&self, _instance: &str) -> Result<Vec<f64>> {
        Ok(Vec::new())
    }

    async fn read_reward_metrics(&self, _instance: &str) -> Result<MetricSample> {
        Ok(MetricSample::default())
    }

    async fn apply_knobs(&self, _instance: &str, _knobs: &[KnobValue]) -> Result<()> {
        Ok(())
    }

    async fn read_knob_descriptors(
        &self,
        _instance: &str,
        knob_names: &[String],
    ) -> Result<Vec<KnobSpec>> {
        if !self.preset_knobs.is_empty() {
            return Ok(self.preset_knobs.clone());
        }

        Ok(knob_names
            .iter()
            .map(|name| KnobSpec {
                name: name.clone(),
                min_value: 0.0,
                max_value: 1.0,
                value: 0.0,
            })
            .collect())
    }

    async fn step(
        &self,
        _instance: &str,
        _knobs: &[KnobValue],
    ) -> Result<Option<StepObservation>> {
        Ok(None)
    }
}
