// ABOUTME: Environment-based configuration for backend selection and goal tuning
// ABOUTME: Runtime strategy choice between the mock and device health backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! Environment-variable-driven configuration.
//!
//! The execution environment decides which health backend the facade
//! constructs at startup. The choice is a runtime value, injected by the
//! composition root, so tests can exercise both strategies without build
//! flags.

use crate::constants::{env_vars, goal};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Execution environment the app was launched in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// A physical device with a platform health store.
    Device,
    /// A simulated/virtual device; health data comes from the mock backend.
    #[default]
    Simulator,
}

impl Environment {
    /// Parse from string with fallback to the default.
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "device" => Self::Device,
            "simulator" => Self::Simulator,
            other => {
                warn!("unrecognized environment {other:?}, defaulting to simulator");
                Self::Simulator
            }
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Simulator => write!(f, "simulator"),
        }
    }
}

/// Runtime configuration for the health-data core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthConfig {
    /// Which backend the facade constructs.
    pub environment: Environment,
    /// Daily step goal.
    pub step_goal: u32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            step_goal: goal::DEFAULT_STEP_GOAL,
        }
    }
}

impl HealthConfig {
    /// Load configuration from environment variables.
    ///
    /// `CHARLIE_ENV` selects the backend (`device` or `simulator`, default
    /// `simulator`); `CHARLIE_STEP_GOAL` overrides the daily goal. Malformed
    /// values fall back to defaults with a warning rather than failing
    /// startup.
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var(env_vars::ENVIRONMENT)
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        let step_goal = env::var(env_vars::STEP_GOAL)
            .ok()
            .and_then(|v| match v.parse::<u32>() {
                Ok(parsed) if parsed > 0 => Some(parsed),
                _ => {
                    warn!("invalid {} value {v:?}, using default", env_vars::STEP_GOAL);
                    None
                }
            })
            .unwrap_or(goal::DEFAULT_STEP_GOAL);

        Self {
            environment,
            step_goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_reads_device_environment() {
        env::set_var(env_vars::ENVIRONMENT, "device");
        env::set_var(env_vars::STEP_GOAL, "12500");
        let config = HealthConfig::from_env();
        env::remove_var(env_vars::ENVIRONMENT);
        env::remove_var(env_vars::STEP_GOAL);

        assert_eq!(config.environment, Environment::Device);
        assert_eq!(config.step_goal, 12_500);
    }

    #[test]
    #[serial]
    fn malformed_values_fall_back_to_defaults() {
        env::set_var(env_vars::ENVIRONMENT, "spaceship");
        env::set_var(env_vars::STEP_GOAL, "not-a-number");
        let config = HealthConfig::from_env();
        env::remove_var(env_vars::ENVIRONMENT);
        env::remove_var(env_vars::STEP_GOAL);

        assert_eq!(config.environment, Environment::Simulator);
        assert_eq!(config.step_goal, goal::DEFAULT_STEP_GOAL);
    }
}
