//! Configuration loading for the dbtune CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

use dbtune_rl::PolicyConfig;

/// Configuration for a tuning run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub tuning: TuningConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub host: String,
    pub port: u16,
    pub instance: String,
}

impl TargetConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 7003,
            instance: "test".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub knobs: Vec<String>,
    pub episodes: usize,
    pub steps_per_episode: usize,
    pub action_scale: f64,
    pub dry_run: bool,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            knobs: [
                "work_mem",
                "maintenance_work_mem",
                "checkpoint_completion_target",
                "effective_cache_size",
                "wal_writer_delay",
                "checkpoint_timeout",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            episodes: 1,
            steps_per_episode: 10,
            action_scale: dbtune_rl::DEFAULT_ACTION_SCALE,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub learning_rate: f64,
    pub noise_scale: f64,
    pub noise_decay: f64,
    pub min_noise: f64,
    pub batch_size: usize,
    pub buffer_capacity: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        let policy = PolicyConfig::default();
        Self {
            learning_rate: policy.learning_rate,
            noise_scale: policy.noise_scale,
            noise_decay: policy.noise_decay,
            min_noise: policy.min_noise,
            batch_size: policy.batch_size,
            buffer_capacity: policy.buffer_capacity,
        }
    }
}

impl AgentConfig {
    pub fn to_policy_config(&self) -> PolicyConfig {
        PolicyConfig {
            learning_rate: self.learning_rate,
            noise_scale: self.noise_scale,
            noise_decay: self.noise_decay,
            min_noise: self.min_noise,
            batch_size: self.batch_size,
            buffer_capacity: self.buffer_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            tuning: TuningConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file();

        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        // Add config file if it exists
        if let Some(path) = &config_path {
            tracing::info!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path.clone()).required(false));
        } else {
            tracing::info!("No config file found, using defaults");
        }

        // Add environment variables with DBTUNE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DBTUNE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Find the configuration file
    fn find_config_file() -> Option<PathBuf> {
        // Check in order: DBTUNE_CONFIG env, ./dbtune.toml,
        // ~/.config/dbtune/dbtune.toml
        if let Ok(path) = std::env::var("DBTUNE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from("dbtune.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("dbtune").join("dbtune.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }
}
