// ABOUTME: Tests for the environment-selecting health facade
// ABOUTME: Backend selection, delegation, and the mock control surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use charlie_core::config::{Environment, HealthConfig};
use charlie_core::errors::ProviderError;
use charlie_core::models::AuthorizationStatus;
use charlie_core::providers::{
    AuthorizationResponse, HealthDataProvider, HealthFacade, MockHealthState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn simulator_config() -> HealthConfig {
    HealthConfig {
        environment: Environment::Simulator,
        step_goal: 10_000,
    }
}

fn device_config() -> HealthConfig {
    HealthConfig {
        environment: Environment::Device,
        step_goal: 10_000,
    }
}

#[tokio::test]
async fn simulator_environment_selects_the_mock_backend() {
    let facade = HealthFacade::new(&simulator_config());
    assert_eq!(facade.name(), "mock");
    assert!(facade.mock_controls().is_some());
}

#[tokio::test]
async fn device_environment_hides_the_mock_controls() {
    let facade = HealthFacade::new(&device_config());
    assert_eq!(facade.name(), "device");
    assert!(facade.mock_controls().is_none());
}

#[tokio::test]
async fn device_facade_without_a_store_reports_unavailable() {
    let facade = HealthFacade::new(&device_config());
    assert_eq!(
        facade.authorization_status(),
        AuthorizationStatus::Unavailable
    );

    let result = facade.request_authorization().await;
    assert_eq!(result, Err(ProviderError::HealthDataNotAvailable));
    assert_eq!(
        facade.authorization_error(),
        Some(ProviderError::HealthDataNotAvailable)
    );
}

#[tokio::test]
async fn facade_steps_follow_the_mock_controls() {
    let facade = HealthFacade::new(&simulator_config());
    facade
        .mock_controls()
        .expect("mock backend active")
        .simulate_partial_progress();

    let mut rx = facade.subscribe_today_steps();
    timeout(WAIT, rx.wait_for(|steps| *steps == 6_500))
        .await
        .expect("facade mirror timed out")
        .unwrap();
    assert_eq!(facade.today_steps(), 6_500);
}

#[tokio::test]
async fn facade_shares_an_externally_owned_mock_state() {
    let state = Arc::new(MockHealthState::new());
    let facade = HealthFacade::with_mock_state(Arc::clone(&state));

    state.simulate_step_goal_reached();

    let mut rx = facade.subscribe_today_steps();
    timeout(WAIT, rx.wait_for(|steps| *steps == 10_500))
        .await
        .expect("facade mirror timed out")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn facade_delegates_authorization_outcomes() {
    let facade = HealthFacade::new(&simulator_config());
    let controls = facade.mock_controls().expect("mock backend active").clone();

    controls.set_authorization_response(AuthorizationResponse::Deny);
    let denied = facade.request_authorization().await;
    assert_eq!(denied, Err(ProviderError::AuthorizationDenied));
    assert_eq!(
        facade.authorization_status(),
        AuthorizationStatus::SharingDenied
    );

    controls.set_authorization_response(AuthorizationResponse::Allow);
    facade.request_authorization().await.unwrap();
    assert!(facade.is_authorized());
    assert_eq!(
        facade.authorization_status(),
        AuthorizationStatus::SharingAuthorized
    );
}

#[tokio::test]
async fn subscriptions_resolve_to_stable_channels() {
    let facade = HealthFacade::new(&simulator_config());
    let rx_a = facade.subscribe_today_steps();
    let rx_b = facade.subscribe_today_steps();

    // Both receivers watch the same backend channel.
    assert!(rx_a.same_channel(&rx_b));
}
