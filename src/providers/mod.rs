// ABOUTME: Health-data provider backends and their shared contract
// ABOUTME: Unifies mock and device step-data access behind one interface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

//! # Providers
//!
//! The backend subsystem: the shared [`core::HealthDataProvider`] contract,
//! the centralized [`mock_state::MockHealthState`], the two backends, the
//! platform store SPI, and the environment-selecting
//! [`facade::HealthFacade`] the app layer holds.

pub mod core;
pub mod device;
pub mod facade;
pub mod mock;
pub mod mock_state;
pub mod spi;
pub mod utils;

pub use self::core::HealthDataProvider;
pub use device::DeviceHealthProvider;
pub use facade::HealthFacade;
pub use mock::MockHealthProvider;
pub use mock_state::{AuthorizationResponse, MockHealthState};
pub use spi::{HealthStore, ObserverRegistration, StoreAuthorization, StoreError};
