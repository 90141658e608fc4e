// ABOUTME: Mock health backend for simulated environments
// ABOUTME: Mirrors centralized mock state and simulates authorization outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Mock Backend
//!
//! Wraps [`MockHealthState`] behind the provider contract. Displayed state
//! is mirrored from the centralized instance by watch subscriptions (push,
//! not polled), so every consumer wired to the same state sees the same
//! world. Authorization requests resolve against the state's response knob
//! after a simulated prompt latency, and historical days are synthesized
//! deterministically so repeated fetches agree.

use crate::constants::mock;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::AuthorizationStatus;
use crate::observable::StateCell;
use crate::providers::core::HealthDataProvider;
use crate::providers::mock_state::{AuthorizationResponse, MockHealthState};
use crate::providers::utils::{self, InFlightGuard, SeededGenerator};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mock implementation of [`HealthDataProvider`].
///
/// Construction spawns the mirroring subscription task and therefore
/// requires a Tokio runtime. The subscription is released when the provider
/// is dropped.
pub struct MockHealthProvider {
    state: Arc<MockHealthState>,
    today_steps: StateCell<i64>,
    is_authorized: StateCell<bool>,
    previously_denied: StateCell<bool>,
    authorization_error: StateCell<Option<ProviderError>>,
    is_requesting: StateCell<bool>,
    binding: JoinHandle<()>,
}

impl MockHealthProvider {
    /// Create a mock backend mirroring `state`.
    #[must_use]
    pub fn new(state: Arc<MockHealthState>) -> Self {
        let today_steps = StateCell::new(state.step_count());
        let previously_denied = StateCell::new(matches!(
            state.authorization_response(),
            AuthorizationResponse::Deny
        ));

        let binding = Self::spawn_binding(&state, &today_steps, &previously_denied);

        Self {
            state,
            today_steps,
            is_authorized: StateCell::new(false),
            previously_denied,
            authorization_error: StateCell::new(None),
            is_requesting: StateCell::new(false),
            binding,
        }
    }

    /// Forward centralized state into this backend's published properties.
    fn spawn_binding(
        state: &Arc<MockHealthState>,
        today_steps: &StateCell<i64>,
        previously_denied: &StateCell<bool>,
    ) -> JoinHandle<()> {
        let mut steps_rx = state.subscribe_step_count();
        let mut response_rx = state.subscribe_authorization_response();
        let today_steps = today_steps.clone();
        let previously_denied = previously_denied.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = steps_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        today_steps.set(*steps_rx.borrow_and_update());
                    }
                    changed = response_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let response = *response_rx.borrow_and_update();
                        previously_denied.set(matches!(response, AuthorizationResponse::Deny));
                    }
                }
            }
        })
    }
}

#[async_trait]
impl HealthDataProvider for MockHealthProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn today_steps(&self) -> i64 {
        self.today_steps.get()
    }

    fn subscribe_today_steps(&self) -> watch::Receiver<i64> {
        self.today_steps.subscribe()
    }

    fn is_authorized(&self) -> bool {
        self.is_authorized.get()
    }

    fn subscribe_is_authorized(&self) -> watch::Receiver<bool> {
        self.is_authorized.subscribe()
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        if self.is_authorized.get() {
            AuthorizationStatus::SharingAuthorized
        } else if self.previously_denied.get() {
            AuthorizationStatus::SharingDenied
        } else {
            AuthorizationStatus::NotDetermined
        }
    }

    fn authorization_error(&self) -> Option<ProviderError> {
        self.authorization_error.get()
    }

    fn subscribe_authorization_error(&self) -> watch::Receiver<Option<ProviderError>> {
        self.authorization_error.subscribe()
    }

    fn is_requesting_authorization(&self) -> bool {
        self.is_requesting.get()
    }

    fn subscribe_is_requesting_authorization(&self) -> watch::Receiver<bool> {
        self.is_requesting.subscribe()
    }

    async fn request_authorization(&self) -> ProviderResult<()> {
        let _in_flight = InFlightGuard::begin(&self.is_requesting);
        self.authorization_error.set(None);

        // Snapshot the knob now; a change mid-request must not retroactively
        // alter the outcome.
        let response = self.state.authorization_response();

        let latency = match response {
            AuthorizationResponse::Delay => {
                Duration::from_millis(mock::DELAYED_AUTHORIZATION_LATENCY_MS)
            }
            AuthorizationResponse::Allow | AuthorizationResponse::Deny => {
                Duration::from_millis(mock::AUTHORIZATION_LATENCY_MS)
            }
        };
        tokio::time::sleep(latency).await;

        match response {
            AuthorizationResponse::Allow | AuthorizationResponse::Delay => {
                self.is_authorized.set(true);
                self.previously_denied.set(false);
                self.start_observing_steps();
                Ok(())
            }
            AuthorizationResponse::Deny => {
                self.is_authorized.set(false);
                self.previously_denied.set(true);
                self.authorization_error
                    .set(Some(ProviderError::AuthorizationDenied));
                Err(ProviderError::AuthorizationDenied)
            }
        }
    }

    fn start_observing_steps(&self) {
        // The push binding established at construction already delivers
        // every step change; kept for interface parity with the device
        // backend.
    }

    fn fetch_today_steps(&self) {
        // Same: the mirrored property is always current.
    }

    async fn fetch_steps_on(&self, date: NaiveDate) -> ProviderResult<i64> {
        tokio::time::sleep(Duration::from_millis(mock::HISTORY_FETCH_LATENCY_MS)).await;

        let today = utils::local_today();
        if date == today {
            return Ok(self.today_steps.get());
        }

        // Seed is a pure function of the requested date (for a fixed
        // "today"), so the same day always backfills the same count.
        let day_offset = today.signed_duration_since(date).num_days();
        let seed = (day_offset.abs() + utils::epoch_day(date)).unsigned_abs();
        let mut generator = SeededGenerator::new(seed);
        Ok(generator.next_in(mock::HISTORY_STEP_RANGE))
    }
}

impl Drop for MockHealthProvider {
    fn drop(&mut self) {
        self.binding.abort();
    }
}
