// ABOUTME: Single-writer observable property cells built on tokio watch channels
// ABOUTME: Backs the reactive properties that view layers bind to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

use std::sync::Arc;
use tokio::sync::watch;

/// A single-writer observable value.
///
/// Owners mutate through [`StateCell::set`]; any number of observers take
/// snapshots with [`StateCell::get`] or follow changes through
/// [`StateCell::subscribe`]. Every write is published, including writes of an
/// equal value, so observers see one wakeup per publication.
///
/// Cloning a `StateCell` clones a handle to the same underlying channel, not
/// the value. All handles share writer rights; components keep their cells
/// private and expose only receivers to preserve the single-writer rule.
#[derive(Debug, Clone)]
pub struct StateCell<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Publish a new value to all observers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe to future publications. The receiver starts with the
    /// current value already marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
