// ABOUTME: Library entry point for the Charlie health-data core
// ABOUTME: Provider backends, mock simulation state, and goal/reward models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

#![deny(unsafe_code)]

//! # Charlie Core
//!
//! The service core of Charlie, a walking-companion app that tracks daily
//! steps toward a 10,000-step goal. This crate owns everything below the
//! view layer's bindings:
//!
//! - **Providers**: a shared [`providers::HealthDataProvider`] contract with
//!   a mock backend (driven by centralized, observable simulation state) and
//!   a device backend (over an opaque platform health store SPI)
//! - **Facade**: [`providers::HealthFacade`] selects one backend at startup
//!   from the injected [`config::HealthConfig`] and delegates every call
//! - **Models**: authorization status and goal progress for the UI layer
//! - **Rewards**: the non-repeating reward photo pool
//!
//! View layers bind to the observable properties (watch-channel backed) and
//! surface [`errors::ProviderError`] descriptions and recovery hints to the
//! user.
//!
//! ## Example
//!
//! ```rust,no_run
//! use charlie_core::config::HealthConfig;
//! use charlie_core::providers::{HealthDataProvider, HealthFacade};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HealthConfig::from_env();
//!     let health = HealthFacade::new(&config);
//!
//!     health.request_authorization().await?;
//!     let steps = health.today_steps();
//!     println!("{steps} steps so far today");
//!     Ok(())
//! }
//! ```

/// Environment-based configuration and backend selection.
pub mod config;

/// System-wide constants.
pub mod constants;

/// Provider error taxonomy with user-facing messages and recovery hints.
pub mod errors;

/// Structured logging configuration.
pub mod logging;

/// Shared domain models consumed by the UI layer.
pub mod models;

/// Observable property cells backing the reactive contract.
pub mod observable;

/// Health-data provider backends and their shared contract.
pub mod providers;

/// Reward photo pool for goal celebrations.
pub mod rewards;
