// ABOUTME: Environment-selecting facade over the health backends
// ABOUTME: One backend chosen at construction, every call a direct delegation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Environment-Selecting Facade
//!
//! [`HealthFacade`] is the single entry point the app layer holds. The
//! backend is chosen exactly once, at construction, from the injected
//! [`HealthConfig`], a runtime strategy rather than a compile-time branch, and
//! every contract method delegates to it without added logic. Because the
//! backend never changes, subscriptions handed out through the facade
//! resolve to the same underlying channels for the facade's whole lifetime.

use crate::config::{Environment, HealthConfig};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::AuthorizationStatus;
use crate::providers::core::HealthDataProvider;
use crate::providers::device::DeviceHealthProvider;
use crate::providers::mock::MockHealthProvider;
use crate::providers::mock_state::MockHealthState;
use crate::providers::spi::{HealthStore, UnavailableHealthStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Facade exposing the provider contract for whichever backend the
/// environment calls for.
pub struct HealthFacade {
    backend: Arc<dyn HealthDataProvider>,
    mock_state: Option<Arc<MockHealthState>>,
}

impl HealthFacade {
    /// Build a facade for `config` with no platform store binding; a
    /// device-environment facade then reports health data as unavailable.
    #[must_use]
    pub fn new(config: &HealthConfig) -> Self {
        Self::with_store(config, Arc::new(UnavailableHealthStore))
    }

    /// Build a facade for `config`, using `store` when the device backend
    /// is selected.
    #[must_use]
    pub fn with_store(config: &HealthConfig, store: Arc<dyn HealthStore>) -> Self {
        match config.environment {
            Environment::Simulator => Self::with_mock_state(Arc::new(MockHealthState::new())),
            Environment::Device => {
                info!("health facade using device backend");
                Self {
                    backend: Arc::new(DeviceHealthProvider::new(store)),
                    mock_state: None,
                }
            }
        }
    }

    /// Build a mock-backed facade sharing an externally owned state, so a
    /// debug panel and the facade observe the same simulated world.
    #[must_use]
    pub fn with_mock_state(state: Arc<MockHealthState>) -> Self {
        info!("health facade using mock backend");
        Self {
            backend: Arc::new(MockHealthProvider::new(Arc::clone(&state))),
            mock_state: Some(state),
        }
    }

    /// Developer/testing control surface. `Some` only while the mock
    /// backend is active; not part of the production contract.
    #[must_use]
    pub fn mock_controls(&self) -> Option<&Arc<MockHealthState>> {
        self.mock_state.as_ref()
    }
}

#[async_trait]
impl HealthDataProvider for HealthFacade {
    fn name(&self) -> &'static str {
        self.backend.name()
    }

    fn today_steps(&self) -> i64 {
        self.backend.today_steps()
    }

    fn subscribe_today_steps(&self) -> watch::Receiver<i64> {
        self.backend.subscribe_today_steps()
    }

    fn is_authorized(&self) -> bool {
        self.backend.is_authorized()
    }

    fn subscribe_is_authorized(&self) -> watch::Receiver<bool> {
        self.backend.subscribe_is_authorized()
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.backend.authorization_status()
    }

    fn authorization_error(&self) -> Option<ProviderError> {
        self.backend.authorization_error()
    }

    fn subscribe_authorization_error(&self) -> watch::Receiver<Option<ProviderError>> {
        self.backend.subscribe_authorization_error()
    }

    fn is_requesting_authorization(&self) -> bool {
        self.backend.is_requesting_authorization()
    }

    fn subscribe_is_requesting_authorization(&self) -> watch::Receiver<bool> {
        self.backend.subscribe_is_requesting_authorization()
    }

    async fn request_authorization(&self) -> ProviderResult<()> {
        self.backend.request_authorization().await
    }

    fn start_observing_steps(&self) {
        self.backend.start_observing_steps();
    }

    fn fetch_today_steps(&self) {
        self.backend.fetch_today_steps();
    }

    async fn fetch_steps_on(&self, date: NaiveDate) -> ProviderResult<i64> {
        self.backend.fetch_steps_on(date).await
    }
}
