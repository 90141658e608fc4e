// ABOUTME: Device health backend over the platform health store SPI
// ABOUTME: Authorization flow, statistics queries, and passive observation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Device Backend
//!
//! Implements the provider contract against a platform health store consumed
//! through the [`HealthStore`] SPI. Today's count is never cached beyond the
//! published property: every refresh re-queries the store's cumulative sum
//! for `[start of today, now)`. Passive observation registers a store
//! observer whose notifications trigger refreshes; re-registration always
//! tears the previous observer down first so deliveries are never
//! duplicated.

use crate::errors::{ProviderError, ProviderResult};
use crate::models::AuthorizationStatus;
use crate::observable::StateCell;
use crate::providers::core::HealthDataProvider;
use crate::providers::spi::{HealthStore, ObserverRegistration, StoreAuthorization};
use crate::providers::utils::{self, InFlightGuard};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

struct ActiveObserver {
    /// Held for its drop side effect: unregisters with the platform store.
    _registration: Box<dyn ObserverRegistration>,
    forwarder: JoinHandle<()>,
}

struct DeviceInner {
    store: Arc<dyn HealthStore>,
    today_steps: StateCell<i64>,
    is_authorized: StateCell<bool>,
    authorization_status: StateCell<AuthorizationStatus>,
    authorization_error: StateCell<Option<ProviderError>>,
    is_requesting: StateCell<bool>,
    observer: Mutex<Option<ActiveObserver>>,
}

/// Device implementation of [`HealthDataProvider`].
pub struct DeviceHealthProvider {
    inner: Arc<DeviceInner>,
}

fn map_store_authorization(status: StoreAuthorization) -> AuthorizationStatus {
    match status {
        StoreAuthorization::NotDetermined => AuthorizationStatus::NotDetermined,
        StoreAuthorization::SharingDenied => AuthorizationStatus::SharingDenied,
        StoreAuthorization::SharingAuthorized => AuthorizationStatus::SharingAuthorized,
        // Future platform codes degrade to unavailable rather than guessing.
        StoreAuthorization::Unknown(_) => AuthorizationStatus::Unavailable,
    }
}

impl DeviceInner {
    fn refresh_authorization_status(&self) {
        let status = map_store_authorization(self.store.authorization_status());
        self.authorization_status.set(status);
        self.is_authorized
            .set(status == AuthorizationStatus::SharingAuthorized);
    }

    /// Re-query the cumulative sum for today and publish it. Query errors
    /// are logged and the published value is left unchanged; a range with no
    /// samples likewise publishes nothing.
    async fn refresh_today_steps(&self) {
        let (start, end) = utils::today_so_far();
        match self.store.cumulative_steps(start, end).await {
            Ok(Some(sum)) => {
                #[allow(clippy::cast_possible_truncation)]
                let steps = sum as i64;
                self.today_steps.set(steps);
            }
            Ok(None) => {}
            Err(err) => warn!("failed to refresh today's steps: {err}"),
        }
    }

    fn observer_slot(&self) -> std::sync::MutexGuard<'_, Option<ActiveObserver>> {
        self.observer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DeviceInner {
    fn drop(&mut self) {
        if let Some(observer) = self.observer_slot().take() {
            observer.forwarder.abort();
        }
    }
}

impl DeviceHealthProvider {
    /// Create a device backend over `store` and snapshot its current
    /// permission status.
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        let inner = Arc::new(DeviceInner {
            store,
            today_steps: StateCell::new(0),
            is_authorized: StateCell::new(false),
            authorization_status: StateCell::new(AuthorizationStatus::NotDetermined),
            authorization_error: StateCell::new(None),
            is_requesting: StateCell::new(false),
            observer: Mutex::new(None),
        });
        inner.refresh_authorization_status();
        Self { inner }
    }

    /// Re-read the permission status from the platform store.
    pub fn refresh_authorization_status(&self) {
        self.inner.refresh_authorization_status();
    }
}

#[async_trait]
impl HealthDataProvider for DeviceHealthProvider {
    fn name(&self) -> &'static str {
        "device"
    }

    fn today_steps(&self) -> i64 {
        self.inner.today_steps.get()
    }

    fn subscribe_today_steps(&self) -> watch::Receiver<i64> {
        self.inner.today_steps.subscribe()
    }

    fn is_authorized(&self) -> bool {
        self.inner.is_authorized.get()
    }

    fn subscribe_is_authorized(&self) -> watch::Receiver<bool> {
        self.inner.is_authorized.subscribe()
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.inner.authorization_status.get()
    }

    fn authorization_error(&self) -> Option<ProviderError> {
        self.inner.authorization_error.get()
    }

    fn subscribe_authorization_error(&self) -> watch::Receiver<Option<ProviderError>> {
        self.inner.authorization_error.subscribe()
    }

    fn is_requesting_authorization(&self) -> bool {
        self.inner.is_requesting.get()
    }

    fn subscribe_is_requesting_authorization(&self) -> watch::Receiver<bool> {
        self.inner.is_requesting.subscribe()
    }

    async fn request_authorization(&self) -> ProviderResult<()> {
        let inner = &self.inner;
        let _in_flight = InFlightGuard::begin(&inner.is_requesting);
        inner.authorization_error.set(None);

        if !inner.store.is_health_data_available() {
            inner
                .authorization_error
                .set(Some(ProviderError::HealthDataNotAvailable));
            return Err(ProviderError::HealthDataNotAvailable);
        }

        if let Err(err) = inner.store.request_read_authorization().await {
            let wrapped = ProviderError::unknown(err);
            inner.authorization_error.set(Some(wrapped.clone()));
            return Err(wrapped);
        }

        inner.refresh_authorization_status();
        if inner.is_authorized.get() {
            self.start_observing_steps();
            return Ok(());
        }
        if inner.authorization_status.get() == AuthorizationStatus::SharingDenied {
            inner
                .authorization_error
                .set(Some(ProviderError::AuthorizationDenied));
            return Err(ProviderError::AuthorizationDenied);
        }
        // The prompt completed without a decision; leave the status as the
        // store reports it.
        Ok(())
    }

    fn start_observing_steps(&self) {
        self.fetch_today_steps();

        let inner = &self.inner;
        let mut slot = inner.observer_slot();
        if let Some(previous) = slot.take() {
            previous.forwarder.abort();
            debug!("replaced previous step observer");
        }

        let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
        match inner.store.register_observer(notify_tx) {
            Ok(registration) => {
                let weak = Arc::downgrade(inner);
                let forwarder = tokio::spawn(async move {
                    while notify_rx.recv().await.is_some() {
                        let Some(inner) = weak.upgrade() else { break };
                        inner.refresh_today_steps().await;
                    }
                });
                *slot = Some(ActiveObserver {
                    _registration: registration,
                    forwarder,
                });
            }
            Err(err) => warn!("failed to register step observer: {err}"),
        }
        drop(slot);

        let store = Arc::clone(&inner.store);
        tokio::spawn(async move {
            if let Err(err) = store.enable_background_delivery().await {
                warn!("failed to enable background step delivery: {err}");
            }
        });
    }

    fn fetch_today_steps(&self) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.refresh_today_steps().await;
        });
    }

    async fn fetch_steps_on(&self, date: NaiveDate) -> ProviderResult<i64> {
        let (start, end) = utils::local_day_bounds(date);
        match self.inner.store.cumulative_steps(start, end).await {
            Ok(Some(sum)) => {
                #[allow(clippy::cast_possible_truncation)]
                let steps = sum as i64;
                Ok(steps)
            }
            Ok(None) => Ok(0),
            Err(err) => Err(ProviderError::unknown(err)),
        }
    }
}
