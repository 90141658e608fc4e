// ABOUTME: Centralized observable state for simulated health data
// ABOUTME: Single source of truth for mock step count, auth response, and auto-walk timer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Centralized Mock State
//!
//! One shared instance owns everything the mock backend displays: the
//! simulated step count (clamped on every write), the authorization response
//! knob, and the auto-walk timer. The mock backend never mutates this state;
//! it only observes it, which keeps the simulated world free of split-brain
//! values when several consumers are wired to the same instance.
//!
//! The instance is constructed once at the composition root and passed by
//! `Arc` to every consumer; there is no global lookup.

use crate::constants::mock;
use crate::observable::StateCell;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// How the mock backend resolves the next authorization request.
///
/// A testing knob: set from the debug control panel, read by the mock
/// backend at request time. Changing it never retroactively affects a
/// request already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationResponse {
    /// Grant access after the normal prompt latency.
    #[default]
    Allow,
    /// Decline access after the normal prompt latency.
    Deny,
    /// Grant access after an extended latency, modeling a slow prompt.
    Delay,
}

struct SimulationTask {
    shutdown: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Single shared source of truth for simulated health data.
pub struct MockHealthState {
    step_count: StateCell<i64>,
    authorization_response: StateCell<AuthorizationResponse>,
    simulate_real_time_updates: StateCell<bool>,
    simulation: Mutex<Option<SimulationTask>>,
}

impl MockHealthState {
    /// Create the state with its defaults: zero steps, `Allow`, simulation
    /// off.
    ///
    /// Zero is the authoritative default step count; the presets exist for
    /// opting into non-zero fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: StateCell::new(0),
            authorization_response: StateCell::new(AuthorizationResponse::default()),
            simulate_real_time_updates: StateCell::new(false),
            simulation: Mutex::new(None),
        }
    }

    /// Current simulated step count.
    #[must_use]
    pub fn step_count(&self) -> i64 {
        self.step_count.get()
    }

    /// Follow step count changes.
    #[must_use]
    pub fn subscribe_step_count(&self) -> watch::Receiver<i64> {
        self.step_count.subscribe()
    }

    /// Response the next authorization request will resolve to.
    #[must_use]
    pub fn authorization_response(&self) -> AuthorizationResponse {
        self.authorization_response.get()
    }

    /// Follow authorization response changes.
    #[must_use]
    pub fn subscribe_authorization_response(&self) -> watch::Receiver<AuthorizationResponse> {
        self.authorization_response.subscribe()
    }

    /// Whether the auto-walk simulation is running.
    #[must_use]
    pub fn simulate_real_time_updates(&self) -> bool {
        self.simulate_real_time_updates.get()
    }

    /// Set the simulated step count, clamped to the allowed bounds before
    /// publication. Observers only ever see the clamped value.
    pub fn set_step_count(&self, count: i64) {
        self.step_count
            .set(count.clamp(mock::MIN_STEP_COUNT, mock::MAX_STEP_COUNT));
    }

    /// Select how the next authorization request resolves.
    pub fn set_authorization_response(&self, response: AuthorizationResponse) {
        self.authorization_response.set(response);
    }

    /// Turn the auto-walk simulation on or off. Idempotent in both
    /// directions. Enabling requires a Tokio runtime.
    pub fn set_simulate_real_time_updates(&self, enabled: bool) {
        self.simulate_real_time_updates.set(enabled);
        if enabled {
            self.start_step_simulation();
        } else {
            self.stop_step_simulation();
        }
    }

    /// Flip the auto-walk simulation.
    pub fn toggle_real_time_updates(&self) {
        self.set_simulate_real_time_updates(!self.simulate_real_time_updates());
    }

    /// Preset: no steps yet today.
    pub fn simulate_no_steps(&self) {
        self.set_step_count(0);
    }

    /// Preset: partial progress toward the goal.
    pub fn simulate_partial_progress(&self) {
        self.set_step_count(mock::PRESET_PARTIAL_PROGRESS);
    }

    /// Preset: the goal has been reached.
    pub fn simulate_step_goal_reached(&self) {
        self.set_step_count(mock::PRESET_GOAL_REACHED);
    }

    fn start_step_simulation(&self) {
        let mut slot = self
            .simulation
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if slot.is_some() {
            return;
        }

        let (shutdown, mut shutdown_rx) = mpsc::channel::<()>(1);
        let steps = self.step_count.clone();
        let period = Duration::from_secs(mock::SIMULATION_PERIOD_SECS);

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    // Shutdown wins over a tick pending in the same poll.
                    biased;
                    _ = shutdown_rx.recv() => {
                        debug!("step simulation task stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let increment = rand::thread_rng().gen_range(mock::SIMULATION_INCREMENT);
                        let walked = (steps.get() + increment).min(mock::SIMULATION_STEP_CAP);
                        steps.set(walked);
                    }
                }
            }
        });

        *slot = Some(SimulationTask { shutdown, handle });
        debug!("step simulation task started");
    }

    fn stop_step_simulation(&self) {
        let task = self
            .simulation
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            // Prefer the cooperative path; abort covers a task that never
            // got to poll its shutdown channel.
            if task.shutdown.try_send(()).is_err() {
                task.handle.abort();
            }
        }
    }
}

impl Default for MockHealthState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MockHealthState {
    fn drop(&mut self) {
        self.stop_step_simulation();
    }
}
