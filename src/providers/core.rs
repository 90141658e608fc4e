// ABOUTME: Core provider trait for unified health data access
// ABOUTME: Observable properties and operations both backends implement identically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Health Data Provider Contract
//!
//! [`HealthDataProvider`] is the capability contract shared by the mock and
//! device backends. It exposes four observable properties (today's step
//! count, authorization state, the last authorization error, and the
//! request-in-flight flag) and four operations to request access, start
//! passive observation, refresh today's count, and fetch an arbitrary
//! calendar day.
//!
//! ## Observable properties
//!
//! Each property pairs a snapshot accessor with a `subscribe_*` method
//! returning a watch receiver. Receivers resolve to the backend's own
//! channels, which live as long as the backend, so bindings established
//! through the facade stay valid for the app's lifetime.
//!
//! ## Error channels
//!
//! Authorization failures travel on two channels at once: recorded on the
//! observable `authorization_error` property for reactive UI, and returned
//! as `Err` from [`HealthDataProvider::request_authorization`] for immediate
//! caller handling. Callers must handle both.

use crate::errors::{ProviderError, ProviderResult};
use crate::models::AuthorizationStatus;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::watch;

/// Unified interface to a health-data backend.
///
/// All implementations are `Send + Sync` and publish property mutations
/// through single-writer watch channels, so no caller-side locking is ever
/// needed to read them.
#[async_trait]
pub trait HealthDataProvider: Send + Sync {
    /// Backend name for diagnostics (e.g. "mock", "device").
    fn name(&self) -> &'static str;

    /// Last known step count for today. Updates asynchronously.
    fn today_steps(&self) -> i64;

    /// Follow changes to [`HealthDataProvider::today_steps`].
    fn subscribe_today_steps(&self) -> watch::Receiver<i64>;

    /// Whether read access is currently granted.
    fn is_authorized(&self) -> bool;

    /// Follow changes to [`HealthDataProvider::is_authorized`].
    fn subscribe_is_authorized(&self) -> watch::Receiver<bool>;

    /// Authorization state derived from the backend's permission source of
    /// truth. Never directly settable by callers.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Last authorization failure, cleared at the start of each new request.
    fn authorization_error(&self) -> Option<ProviderError>;

    /// Follow changes to [`HealthDataProvider::authorization_error`].
    fn subscribe_authorization_error(&self) -> watch::Receiver<Option<ProviderError>>;

    /// True only while an authorization request is in flight.
    ///
    /// The flag exists so UI can disable duplicate taps; it is not a lock.
    fn is_requesting_authorization(&self) -> bool;

    /// Follow changes to [`HealthDataProvider::is_requesting_authorization`].
    fn subscribe_is_requesting_authorization(&self) -> watch::Receiver<bool>;

    /// Request read access to step data.
    ///
    /// Fails with [`ProviderError::HealthDataNotAvailable`] when the
    /// environment has no health store. On denial, records
    /// [`ProviderError::AuthorizationDenied`] on the observable error
    /// property and returns the same error. On success, passive observation
    /// is started.
    ///
    /// At most one call should be in flight per backend instance; behavior
    /// of overlapping calls is unspecified and the backend does not enforce
    /// mutual exclusion. Callers gate on
    /// [`HealthDataProvider::is_requesting_authorization`].
    async fn request_authorization(&self) -> ProviderResult<()>;

    /// Begin passive step updates. Idempotent: a prior observer is torn
    /// down before a new one is registered, never duplicated.
    fn start_observing_steps(&self);

    /// Trigger an asynchronous refresh of today's count. Fire-and-forget:
    /// failures are logged and the property is left unchanged.
    fn fetch_today_steps(&self);

    /// Cumulative step count for the calendar day containing `date`.
    ///
    /// Never mutates [`HealthDataProvider::today_steps`] for non-today
    /// dates. Failures are always propagated, never swallowed.
    async fn fetch_steps_on(&self, date: NaiveDate) -> ProviderResult<i64>;
}
