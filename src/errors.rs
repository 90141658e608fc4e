// ABOUTME: Error taxonomy for health-data provider operations
// ABOUTME: Fixed user-facing messages with recovery hints for the UI layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Provider Error Taxonomy
//!
//! Every failure a backend surfaces to callers is one of the
//! [`ProviderError`] variants. Backends wrap native platform errors into
//! [`ProviderError::Unknown`] so the UI layer never sees a foreign error
//! type. The `Display` message is the user-facing description;
//! [`ProviderError::recovery_suggestion`] supplies the actionable hint shown
//! alongside it.

use thiserror::Error;

/// Result alias used by all provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failures surfaced by health-data providers.
///
/// No variant is fatal to the process: each failure is scoped to the
/// operation that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The environment cannot supply health data at all (e.g. a virtual
    /// device with no health store). Fatal to the request, not to the app.
    #[error("Health data is not available on this device")]
    HealthDataNotAvailable,

    /// Generic permission failure during an authorization request.
    #[error("Failed to authorize health data access")]
    AuthorizationFailed,

    /// The user explicitly declined access. Recoverable through system
    /// settings, hence the specific recovery hint.
    #[error("Health data access was denied. Please enable step access in system settings")]
    AuthorizationDenied,

    /// A query-level failure, generally transient and safe to retry.
    #[error("Failed to fetch health data")]
    DataFetchFailed,

    /// Opaque wrapped failure from the underlying platform. The original
    /// message is preserved for diagnostics.
    #[error("An unexpected error occurred: {message}")]
    Unknown {
        /// Message of the wrapped native error.
        message: String,
    },
}

impl ProviderError {
    /// Wrap a native platform error, preserving its message.
    pub fn unknown(source: impl std::fmt::Display) -> Self {
        Self::Unknown {
            message: source.to_string(),
        }
    }

    /// Actionable hint the UI presents next to the error description.
    #[must_use]
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationDenied => {
                "Open system settings, find Charlie under health data access, and turn on Step Count"
            }
            Self::HealthDataNotAvailable => {
                "Step tracking needs a physical device with a health store; simulated environments use mock data"
            }
            Self::AuthorizationFailed | Self::DataFetchFailed | Self::Unknown { .. } => {
                "Please try again or restart the app"
            }
        }
    }
}
