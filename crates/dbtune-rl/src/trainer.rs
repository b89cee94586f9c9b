//! Episode controller - sequences the gateway, the projector, the
//! reward shaper, and the agent

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use dbtune_core::{KnobSet, MetricSample};
use dbtune_env::{EnvironmentGateway, EpisodeContext};

use crate::agent::LearningAgent;
use crate::projector::{project_actions, DEFAULT_ACTION_SCALE};
use crate::replay::Transition;

/// Training loop parameters. Everything here is configuration, nothing
/// is hardcoded in the loop.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub instance: String,
    pub episodes: usize,
    pub steps_per_episode: usize,
    pub action_scale: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            instance: "test".to_string(),
            episodes: 1,
            steps_per_episode: 10,
            action_scale: DEFAULT_ACTION_SCALE,
        }
    }
}

/// Outcome of a single episode
#[derive(Debug, Clone, Default, Serialize)]
pub struct EpisodeReport {
    pub steps_completed: usize,
    pub transitions_recorded: usize,
    pub total_reward: f64,
    pub anchor_shifts: usize,
    pub final_metrics: Option<MetricSample>,
}

/// Outcome of a full training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub episodes: Vec<EpisodeReport>,
}

/// Drives episodes against one gateway with one agent.
///
/// Owns the working knob set for the lifetime of the run. Strictly
/// sequential: every remote call completes before the next one is
/// issued. Gateway failures propagate and abort the current episode;
/// nothing here retries.
pub struct Trainer {
    gateway: Box<dyn EnvironmentGateway>,
    agent: Box<dyn LearningAgent>,
    knobs: KnobSet,
    config: TrainerConfig,
}

impl std::fmt::Debug for Trainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("knobs", &self.knobs)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Trainer {
    pub fn new(
        gateway: Box<dyn EnvironmentGateway>,
        agent: Box<dyn LearningAgent>,
        knobs: KnobSet,
        config: TrainerConfig,
    ) -> Self {
        Self {
            gateway,
            agent,
            knobs,
            config,
        }
    }

    /// Build a trainer by fetching descriptors for the requested knobs
    /// from the target.
    pub async fn bootstrap(
        gateway: Box<dyn EnvironmentGateway>,
        agent: Box<dyn LearningAgent>,
        knob_names: &[String],
        config: TrainerConfig,
    ) -> Result<Self> {
        let descriptors = gateway
            .read_knob_descriptors(&config.instance, knob_names)
            .await
            .context("Failed to read knob descriptors")?;
        let knobs = KnobSet::from_descriptors(knob_names, descriptors)?;

        info!(knobs = knobs.len(), instance = %config.instance, "trainer ready");
        Ok(Self::new(gateway, agent, knobs, config))
    }

    /// The working knob set (the current search anchor).
    pub fn knobs(&self) -> &KnobSet {
        &self.knobs
    }

    /// Run the configured number of episodes.
    pub async fn run(&mut self) -> Result<TrainingReport> {
        let mut report = TrainingReport {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            episodes: Vec::with_capacity(self.config.episodes),
        };

        for episode in 0..self.config.episodes {
            info!(
                episode = episode + 1,
                total = self.config.episodes,
                "starting episode"
            );

            let outcome = self
                .run_episode()
                .await
                .with_context(|| format!("Episode {} aborted", episode + 1))?;

            info!(
                episode = episode + 1,
                steps = outcome.steps_completed,
                transitions = outcome.transitions_recorded,
                total_reward = outcome.total_reward,
                anchor_shifts = outcome.anchor_shifts,
                "episode complete"
            );
            report.episodes.push(outcome);
        }

        Ok(report)
    }

    /// One episode: INIT, then a fixed budget of steps.
    ///
    /// Baseline and previous-metric bookkeeping live in a fresh
    /// `EpisodeContext` per episode; the gateway connection persists
    /// across episodes but no reward state does.
    pub async fn run_episode(&mut self) -> Result<EpisodeReport> {
        let instance = self.config.instance.clone();

        self.gateway.initialize(&instance).await?;
        let mut state = self.gateway.read_state(&instance).await?;
        let initial = self.gateway.read_reward_metrics(&instance).await?;
        let mut ctx = EpisodeContext::new(initial);

        let mut report = EpisodeReport::default();

        for i in 0..self.config.steps_per_episode {
            let action = self.agent.choose_action(&state);
            let candidate = project_actions(&self.knobs, &action, self.config.action_scale)?;

            let values = candidate.values();
            let Some(observation) = self.gateway.step(&instance, &values).await? else {
                // Dry run: the step yields no transition at all.
                report.steps_completed += 1;
                continue;
            };

            let reward = ctx.observe(&observation.metrics);
            debug!(
                step = i,
                reward,
                throughput = observation.metrics.throughput,
                latency = observation.metrics.latency,
                "step observed"
            );

            self.agent.add_transition(Transition {
                state: state.clone(),
                action,
                reward,
                next_state: observation.next_state.clone(),
            });

            // The very first step never triggers an update: only one
            // transition exists at that point.
            if i > 0 {
                let loss = self.agent.update().context("Agent update failed")?;
                debug!(step = i, loss, "agent updated");
            }

            ctx.advance(observation.metrics.clone());
            state = observation.next_state;

            if ctx.performance_increased() {
                // Anchor shift: subsequent exploration perturbs the
                // improved configuration, not the episode's original one.
                self.knobs = candidate;
                report.anchor_shifts += 1;
            }

            report.total_reward += reward;
            report.transitions_recorded += 1;
            report.final_metrics = Some(observation.metrics);
            report.steps_completed += 1;
        }

        Ok(report)
    }
}
