// ABOUTME: charlie-sim - development harness for the Charlie health core
// ABOUTME: Drives the facade end to end and logs step progress toward the goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! Development harness for the health-data core.
//!
//! Usage:
//! ```bash
//! # Run the mock backend with auto-walk simulation
//! charlie-sim
//!
//! # Lower the goal so the celebration triggers quickly
//! charlie-sim --goal 200 --duration-secs 300
//!
//! # Exercise the device path (fails cleanly without a platform store)
//! charlie-sim --env device
//! ```

use anyhow::Result;
use charlie_core::config::{Environment, HealthConfig};
use charlie_core::logging::LoggingConfig;
use charlie_core::models::GoalProgress;
use charlie_core::providers::{HealthDataProvider, HealthFacade};
use charlie_core::rewards::RewardPhotoPool;
use clap::Parser;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "charlie-sim",
    about = "Charlie health core simulation harness",
    long_about = "Boots the health facade from configuration, requests authorization, and logs step progress until the goal is reached or the run times out."
)]
struct Cli {
    /// Execution environment override (device or simulator)
    #[arg(long)]
    env: Option<String>,

    /// Daily step goal override
    #[arg(long)]
    goal: Option<u32>,

    /// Seconds to run before exiting
    #[arg(long, default_value_t = 120)]
    duration_secs: u64,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = HealthConfig::from_env();
    if let Some(env) = &cli.env {
        config.environment = Environment::from_str_or_default(env);
    }
    if let Some(goal) = cli.goal {
        config.step_goal = goal;
    }

    info!(
        "starting health facade ({} environment, goal {})",
        config.environment, config.step_goal
    );
    let health = HealthFacade::new(&config);

    if let Err(err) = health.request_authorization().await {
        warn!("authorization failed: {err}. {}", err.recovery_suggestion());
        return Err(err.into());
    }
    info!("authorized, status: {:?}", health.authorization_status());

    if let Some(controls) = health.mock_controls() {
        controls.simulate_partial_progress();
        controls.set_simulate_real_time_updates(true);
        info!("auto-walk simulation enabled");
    }

    let mut reward_pool = RewardPhotoPool::new();
    let mut steps_rx = health.subscribe_today_steps();

    let deadline = tokio::time::sleep(Duration::from_secs(cli.duration_secs));
    tokio::pin!(deadline);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            () = &mut deadline => {
                info!("run complete after {}s", cli.duration_secs);
                break;
            }
            _ = &mut interrupt => {
                info!("interrupted");
                break;
            }
            changed = steps_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let steps = *steps_rx.borrow_and_update();
                let progress = GoalProgress::new(steps, config.step_goal);
                info!(
                    "{steps} steps, {:.0}% of goal, {} to go",
                    progress.fraction() * 100.0,
                    progress.remaining()
                );
                if progress.goal_reached() {
                    if let Some(photo) = reward_pool.random_photo(&HashSet::new()) {
                        info!("goal reached! unlocked reward photo {}", photo.asset_name);
                    }
                    break;
                }
            }
        }
    }

    Ok(())
}
