// ABOUTME: System-wide constants for the Charlie health-data core
// ABOUTME: Goal defaults, mock simulation bounds, latencies, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Constants Module
//!
//! Named domain constants grouped by concern. Values that callers may tune at
//! runtime live in [`crate::config`]; everything here is fixed behavior.

/// Daily step goal defaults.
pub mod goal {
    /// Default daily step goal when none is configured.
    pub const DEFAULT_STEP_GOAL: u32 = 10_000;
}

/// Bounds and timing for the mock backend and its centralized state.
pub mod mock {
    use std::ops::RangeInclusive;

    /// Upper clamp for any simulated step count write.
    pub const MAX_STEP_COUNT: i64 = 50_000;

    /// Lower clamp for any simulated step count write.
    pub const MIN_STEP_COUNT: i64 = 0;

    /// Period of the auto-walk simulation timer.
    pub const SIMULATION_PERIOD_SECS: u64 = 30;

    /// Steps added per auto-walk tick, drawn uniformly.
    pub const SIMULATION_INCREMENT: RangeInclusive<i64> = 10..=50;

    /// The auto-walk simulation never pushes the count past this total.
    pub const SIMULATION_STEP_CAP: i64 = 15_000;

    /// Simulated latency for an ordinary authorization prompt.
    pub const AUTHORIZATION_LATENCY_MS: u64 = 500;

    /// Simulated latency when the slow-authorization response is selected.
    pub const DELAYED_AUTHORIZATION_LATENCY_MS: u64 = 3_000;

    /// Simulated latency for a historical day fetch.
    pub const HISTORY_FETCH_LATENCY_MS: u64 = 200;

    /// Range of synthesized historical daily step counts.
    pub const HISTORY_STEP_RANGE: RangeInclusive<i64> = 5_000..=12_000;

    /// Preset: a day with partial progress toward the goal.
    pub const PRESET_PARTIAL_PROGRESS: i64 = 6_500;

    /// Preset: a day where the goal has been reached.
    pub const PRESET_GOAL_REACHED: i64 = 10_500;
}

/// Reward photo pool sizing.
pub mod rewards {
    /// Number of reward photos shipped with the app assets.
    pub const PHOTO_COUNT: u32 = 10;

    /// Asset name prefix; photos are named `charlie_1` through
    /// `charlie_{PHOTO_COUNT}`.
    pub const PHOTO_ASSET_PREFIX: &str = "charlie_";
}

/// Environment variable names read by [`crate::config`].
pub mod env_vars {
    /// Selects the execution environment: `device` or `simulator`.
    pub const ENVIRONMENT: &str = "CHARLIE_ENV";

    /// Overrides the daily step goal.
    pub const STEP_GOAL: &str = "CHARLIE_STEP_GOAL";

    /// Overrides the log output format: `pretty`, `compact`, or `json`.
    pub const LOG_FORMAT: &str = "CHARLIE_LOG_FORMAT";
}
