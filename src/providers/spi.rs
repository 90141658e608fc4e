// ABOUTME: Service Provider Interface for the platform health store
// ABOUTME: Call/response contract the device backend consumes, platform kept opaque
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Health Store SPI
//!
//! The platform health store is an opaque external service. This module
//! defines the narrow contract the device backend consumes: availability,
//! the native permission status, a read-only authorization request, a
//! cumulative statistics query, and passive observer / background delivery
//! registration. Platform bindings implement [`HealthStore`]; tests script
//! it.
//!
//! Only read access to step counts is ever requested through this interface;
//! no write capability exists in the contract.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::sync::mpsc;

/// Native permission status reported by the platform store.
///
/// Raw platform codes outside the known set are carried in
/// [`StoreAuthorization::Unknown`]; the device backend maps those to
/// [`crate::models::AuthorizationStatus::Unavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAuthorization {
    /// The user has not been prompted yet.
    NotDetermined,
    /// The user declined read access.
    SharingDenied,
    /// Read access is granted.
    SharingAuthorized,
    /// A raw platform code this crate does not recognize.
    Unknown(i32),
}

/// Failure reported by the platform health store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store exists but cannot serve health data in this environment.
    #[error("health store is unavailable in this environment")]
    Unavailable,
    /// Any other platform-level failure, message preserved verbatim.
    #[error("{0}")]
    Platform(String),
}

/// A registered passive observer.
///
/// Dropping the registration unregisters the observer with the platform
/// store; the device backend relies on this to guarantee no duplicate
/// delivery after re-registration or teardown.
pub trait ObserverRegistration: Send {}

/// Contract the device backend consumes from a platform health store.
///
/// Implementations must be `Send + Sync`; the backend shares the store
/// across its spawned query tasks.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Whether this environment can supply health data at all.
    fn is_health_data_available(&self) -> bool;

    /// Current native permission status for step-count reads.
    fn authorization_status(&self) -> StoreAuthorization;

    /// Prompt for read access to step counts. Resolving without error means
    /// the prompt completed, not that access was granted; callers re-check
    /// [`HealthStore::authorization_status`] afterwards.
    async fn request_read_authorization(&self) -> Result<(), StoreError>;

    /// Cumulative step sum over `[start, end)`. `Ok(None)` means the range
    /// holds no samples.
    async fn cumulative_steps(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Option<f64>, StoreError>;

    /// Register a passive observer. The store sends `()` on `notify`
    /// whenever underlying step data changes, independent of polling.
    fn register_observer(
        &self,
        notify: mpsc::UnboundedSender<()>,
    ) -> Result<Box<dyn ObserverRegistration>, StoreError>;

    /// Ask the platform to wake the observer for updates while the app is
    /// backgrounded, at the finest frequency available.
    async fn enable_background_delivery(&self) -> Result<(), StoreError>;
}

/// Default store wiring for environments with no platform binding.
///
/// Reports health data as unavailable and fails every operation with
/// [`StoreError::Unavailable`], so a composition root that selects the
/// device backend without injecting a real store still gets total,
/// well-typed behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableHealthStore;

#[async_trait]
impl HealthStore for UnavailableHealthStore {
    fn is_health_data_available(&self) -> bool {
        false
    }

    fn authorization_status(&self) -> StoreAuthorization {
        StoreAuthorization::Unknown(-1)
    }

    async fn request_read_authorization(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn cumulative_steps(
        &self,
        _start: DateTime<Local>,
        _end: DateTime<Local>,
    ) -> Result<Option<f64>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn register_observer(
        &self,
        _notify: mpsc::UnboundedSender<()>,
    ) -> Result<Box<dyn ObserverRegistration>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn enable_background_delivery(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
