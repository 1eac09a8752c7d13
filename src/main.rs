//! Flappy RL entry point
//!
//! Runs built-in policies against the headless simulation, either to collect
//! training statistics or to dump frame snapshots for an external renderer.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use flappy_rl::agent::{Observation, Policy, policy_by_name};
use flappy_rl::sim::{GameState, step};
use flappy_rl::{GameConfig, RunConfig, run_episodes};

#[derive(Parser)]
#[command(name = "flappy-rl", about = "Headless Flappy Bird environment")]
struct Cli {
    /// JSON file overriding the world constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes and report training statistics
    Run {
        /// Policy to play (glide, random, follow)
        #[arg(long, default_value = "random")]
        policy: String,

        /// Random seed for the game and the policy
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of episodes to play
        #[arg(long, default_value_t = 1000)]
        episodes: u64,

        /// Truncate episodes after this many steps
        #[arg(long)]
        max_steps: Option<u64>,

        /// Games per progress report
        #[arg(long, default_value_t = 100)]
        period: u64,

        /// Output path for the statistics JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print one JSON snapshot per step for a renderer
    Trace {
        /// Policy to play (glide, random, follow)
        #[arg(long, default_value = "follow")]
        policy: String,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Steps to simulate
        #[arg(long, default_value_t = 600)]
        steps: u64,
    },
}

fn resolve_policy(name: &str, seed: u64) -> anyhow::Result<Box<dyn Policy>> {
    match policy_by_name(name, seed) {
        Some(policy) => Ok(policy),
        None => bail!("unknown policy '{}' (expected glide, random or follow)", name),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map(GameConfig::load)
        .unwrap_or_default();

    match cli.command {
        Commands::Run {
            policy,
            seed,
            episodes,
            max_steps,
            period,
            report,
        } => {
            let mut policy = resolve_policy(&policy, seed)?;
            let mut state = GameState::with_config(config, seed);
            let run = RunConfig {
                episodes,
                max_steps_per_episode: max_steps,
                period_len: period,
            };

            let stats = run_episodes(&mut state, policy.as_mut(), &run);
            println!(
                "{} episodes: mean score {:.3}, record {}, {} steps",
                stats.games,
                stats.mean_score(),
                stats.record,
                stats.total_steps
            );

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&stats)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                log::info!("Report written to {}", path.display());
            }
        }

        Commands::Trace {
            policy,
            seed,
            steps,
        } => {
            let mut policy = resolve_policy(&policy, seed)?;
            let mut state = GameState::with_config(config, seed);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            for _ in 0..steps {
                let obs = Observation::from_state(&state);
                let result = step(&mut state, policy.act(&obs));
                serde_json::to_writer(&mut out, &state.snapshot())?;
                writeln!(out)?;
                if result.done {
                    log::info!("Crashed with score {}", result.score);
                }
            }
        }
    }

    Ok(())
}
