//! Dbtune CLI - drives the knob autotuner against a target instance

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;
use dbtune_env::{EnvironmentGateway, HttpGateway, NoopGateway};
use dbtune_rl::{LinearPolicy, Trainer, TrainerConfig};

#[derive(Parser)]
#[command(name = "dbtune")]
#[command(version, about = "Closed-loop database knob autotuner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the training loop against the configured target
    Train {
        /// Use the no-op gateway: no remote calls, no transitions
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch and print knob descriptors for the configured knobs
    Knobs,

    /// Check that the target instance is reachable
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dbtune={log_level},dbtune_cli={log_level},dbtune_env={log_level},dbtune_rl={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Train { dry_run } => train(&config, dry_run).await,
        Commands::Knobs => knobs(&config).await,
        Commands::Ping => ping(&config).await,
    }
}

/// Pick the gateway implementation at construction time; the training
/// loop itself never branches on the mode.
fn build_gateway(config: &Config, dry_run: bool) -> Box<dyn EnvironmentGateway> {
    if dry_run || config.tuning.dry_run {
        info!("Dry run: using the no-op gateway");
        Box::new(NoopGateway::new())
    } else {
        Box::new(HttpGateway::new(config.target.base_url()))
    }
}

async fn train(config: &Config, dry_run: bool) -> Result<()> {
    let gateway = build_gateway(config, dry_run);

    // Size the policy from the target's state vector and the knob count.
    let state = gateway.read_state(&config.target.instance).await?;
    let policy = LinearPolicy::new(
        state.len(),
        config.tuning.knobs.len(),
        config.agent.to_policy_config(),
    );

    let trainer_config = TrainerConfig {
        instance: config.target.instance.clone(),
        episodes: config.tuning.episodes,
        steps_per_episode: config.tuning.steps_per_episode,
        action_scale: config.tuning.action_scale,
    };

    let mut trainer = Trainer::bootstrap(
        gateway,
        Box::new(policy),
        &config.tuning.knobs,
        trainer_config,
    )
    .await?;

    let report = trainer.run().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("\nFinal knob configuration:");
    for spec in trainer.knobs() {
        println!("  {} = {}", spec.name, spec.value);
    }

    Ok(())
}

async fn knobs(config: &Config) -> Result<()> {
    let gateway = HttpGateway::new(config.target.base_url());
    let descriptors = gateway
        .read_knob_descriptors(&config.target.instance, &config.tuning.knobs)
        .await?;

    println!(
        "{:<32} {:>16} {:>16} {:>16}",
        "KNOB", "MIN", "MAX", "VALUE"
    );
    for spec in &descriptors {
        println!(
            "{:<32} {:>16} {:>16} {:>16}",
            spec.name, spec.min_value, spec.max_value, spec.value
        );
    }

    Ok(())
}

async fn ping(config: &Config) -> Result<()> {
    let gateway = HttpGateway::new(config.target.base_url());

    match gateway.initialize(&config.target.instance).await {
        Ok(()) => {
            println!(
                "Target {} at {} is reachable",
                config.target.instance,
                config.target.base_url()
            );
            Ok(())
        }
        Err(e) => {
            println!("Target unreachable: {e}");
            Err(e.into())
        }
    }
}
