// ABOUTME: Shared domain models for the health-data core
// ABOUTME: Authorization status and goal progress consumed by the UI layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

use serde::{Deserialize, Serialize};

/// Authorization state of a health-data backend.
///
/// Derived read-only from the backend's own permission source of truth: the
/// platform permission store for the device backend, the mock flags for the
/// mock backend. Never stored independently of that source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user has not yet been asked.
    NotDetermined,
    /// The user explicitly declined read access.
    SharingDenied,
    /// Read access is granted.
    SharingAuthorized,
    /// The environment cannot report a meaningful status.
    Unavailable,
}

/// Progress toward the daily step goal.
///
/// A pure derivation from the current step count and the configured goal;
/// view layers render the ring and celebration state from this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Steps recorded so far today.
    pub steps: i64,
    /// The configured daily goal.
    pub goal: u32,
}

impl GoalProgress {
    /// Build progress for `steps` against `goal`.
    #[must_use]
    pub const fn new(steps: i64, goal: u32) -> Self {
        Self { steps, goal }
    }

    /// Completed fraction of the goal, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.steps.max(0) as f64 / f64::from(self.goal);
        fraction.min(1.0)
    }

    /// Whether the goal has been reached.
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.steps >= i64::from(self.goal)
    }

    /// Steps still missing, zero once the goal is reached.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        (i64::from(self.goal) - self.steps).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(GoalProgress::new(-50, 10_000).fraction(), 0.0);
        assert_eq!(GoalProgress::new(25_000, 10_000).fraction(), 1.0);
        let halfway = GoalProgress::new(5_000, 10_000).fraction();
        assert!((halfway - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn authorization_status_serializes_snake_case() {
        let json = serde_json::to_string(&AuthorizationStatus::SharingAuthorized)
            .expect("serializable");
        assert_eq!(json, "\"sharing_authorized\"");
    }

    #[test]
    fn goal_reached_at_exact_count() {
        assert!(GoalProgress::new(10_000, 10_000).goal_reached());
        assert!(!GoalProgress::new(9_999, 10_000).goal_reached());
        assert_eq!(GoalProgress::new(9_999, 10_000).remaining(), 1);
    }
}
