// ABOUTME: Tests for the mock health backend
// ABOUTME: State mirroring, authorization outcomes, and deterministic history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use charlie_core::errors::ProviderError;
use charlie_core::models::AuthorizationStatus;
use charlie_core::providers::{
    AuthorizationResponse, HealthDataProvider, MockHealthProvider, MockHealthState,
};
use chrono::{Days, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn mock_pair() -> (Arc<MockHealthState>, MockHealthProvider) {
    let state = Arc::new(MockHealthState::new());
    let provider = MockHealthProvider::new(Arc::clone(&state));
    (state, provider)
}

#[tokio::test]
async fn today_steps_mirror_state_writes() {
    let (state, provider) = mock_pair();
    assert_eq!(provider.today_steps(), 0);

    state.set_step_count(8_000);

    let mut rx = provider.subscribe_today_steps();
    timeout(WAIT, rx.wait_for(|steps| *steps == 8_000))
        .await
        .expect("mirror timed out")
        .unwrap();
    assert_eq!(provider.today_steps(), state.step_count());
}

#[tokio::test(start_paused = true)]
async fn deny_fails_and_reports_sharing_denied() {
    let (state, provider) = mock_pair();
    state.set_authorization_response(AuthorizationResponse::Deny);

    let result = provider.request_authorization().await;

    assert_eq!(result, Err(ProviderError::AuthorizationDenied));
    assert_eq!(
        provider.authorization_status(),
        AuthorizationStatus::SharingDenied
    );
    assert_eq!(
        provider.authorization_error(),
        Some(ProviderError::AuthorizationDenied)
    );
    assert!(!provider.is_authorized());
    assert!(!provider.is_requesting_authorization());
}

#[tokio::test(start_paused = true)]
async fn allow_grants_access_and_clears_prior_denial() {
    let (state, provider) = mock_pair();

    state.set_authorization_response(AuthorizationResponse::Deny);
    provider.request_authorization().await.unwrap_err();

    state.set_authorization_response(AuthorizationResponse::Allow);
    provider.request_authorization().await.unwrap();

    assert!(provider.is_authorized());
    assert_eq!(
        provider.authorization_status(),
        AuthorizationStatus::SharingAuthorized
    );
    assert_eq!(provider.authorization_error(), None);
    assert!(!provider.is_requesting_authorization());
}

#[tokio::test(start_paused = true)]
async fn delay_takes_longer_but_still_grants() {
    let (state, provider) = mock_pair();
    state.set_authorization_response(AuthorizationResponse::Delay);

    let started = tokio::time::Instant::now();
    provider.request_authorization().await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(provider.is_authorized());
    assert_eq!(
        provider.authorization_status(),
        AuthorizationStatus::SharingAuthorized
    );
}

#[tokio::test(start_paused = true)]
async fn request_clears_previous_error_up_front() {
    let (state, provider) = mock_pair();

    state.set_authorization_response(AuthorizationResponse::Deny);
    provider.request_authorization().await.unwrap_err();
    assert!(provider.authorization_error().is_some());

    state.set_authorization_response(AuthorizationResponse::Allow);
    let mut error_rx = provider.subscribe_authorization_error();
    let request = provider.request_authorization();
    let cleared = error_rx.wait_for(Option::is_none);

    let (request, cleared) = tokio::join!(request, cleared);
    request.unwrap();
    cleared.unwrap();
    assert_eq!(provider.authorization_error(), None);
}

#[tokio::test(start_paused = true)]
async fn in_flight_flag_spans_exactly_the_request() {
    let (state, provider) = mock_pair();
    state.set_authorization_response(AuthorizationResponse::Deny);
    let provider = Arc::new(provider);

    assert!(!provider.is_requesting_authorization());
    let mut rx = provider.subscribe_is_requesting_authorization();

    let request = tokio::spawn({
        let provider = Arc::clone(&provider);
        async move { provider.request_authorization().await }
    });

    rx.wait_for(|in_flight| *in_flight).await.unwrap();
    rx.wait_for(|in_flight| !*in_flight).await.unwrap();

    // Flag is down even though the request failed.
    request.await.unwrap().unwrap_err();
    assert!(!provider.is_requesting_authorization());
}

#[tokio::test(start_paused = true)]
async fn historical_fetch_is_deterministic_per_date() {
    let (_state, provider) = mock_pair();
    let date = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(5))
        .unwrap();

    let first = provider.fetch_steps_on(date).await.unwrap();
    let second = provider.fetch_steps_on(date).await.unwrap();

    assert_eq!(first, second);
    assert!((5_000..=12_000).contains(&first));
}

#[tokio::test(start_paused = true)]
async fn historical_fetch_covers_distinct_dates() {
    let (_state, provider) = mock_pair();
    let today = Local::now().date_naive();

    for days_back in 1..=10 {
        let date = today.checked_sub_days(Days::new(days_back)).unwrap();
        let steps = provider.fetch_steps_on(date).await.unwrap();
        assert!(
            (5_000..=12_000).contains(&steps),
            "day -{days_back} synthesized {steps}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn fetching_today_returns_the_published_value() {
    let (state, provider) = mock_pair();
    state.set_step_count(9_001);

    let mut rx = provider.subscribe_today_steps();
    rx.wait_for(|steps| *steps == 9_001).await.unwrap();

    let today = Local::now().date_naive();
    let fetched = provider.fetch_steps_on(today).await.unwrap();
    assert_eq!(fetched, 9_001);

    // A non-today fetch must leave the published property alone.
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
    provider.fetch_steps_on(yesterday).await.unwrap();
    assert_eq!(provider.today_steps(), 9_001);
}
