// ABOUTME: Reward photo pool for goal celebrations
// ABOUTME: Random non-repeating photo selection with reset on exhaustion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

use crate::constants::rewards;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One unlockable reward photo, referenced by asset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPhoto {
    /// Stable identifier, 1-based.
    pub id: u32,
    /// Asset catalog name the UI resolves to an image.
    pub asset_name: String,
}

/// Pool of reward photos handed out when the daily goal is reached.
///
/// Draws are random but non-repeating: a photo leaves the pool once shown
/// and only returns when the pool has been exhausted and reset. An exclusion
/// set lets callers avoid photos already on screen.
pub struct RewardPhotoPool {
    photos: Vec<RewardPhoto>,
    available: Vec<u32>,
    unlocked: HashSet<u32>,
}

impl RewardPhotoPool {
    /// Pool over the app's shipped photo assets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_count(rewards::PHOTO_COUNT)
    }

    /// Pool of `count` photos named `charlie_1` through `charlie_{count}`.
    #[must_use]
    pub fn with_count(count: u32) -> Self {
        let photos = (1..=count)
            .map(|id| RewardPhoto {
                id,
                asset_name: format!("{}{id}", rewards::PHOTO_ASSET_PREFIX),
            })
            .collect();
        Self {
            photos,
            available: (1..=count).collect(),
            unlocked: HashSet::new(),
        }
    }

    /// Draw a random photo not yet shown this cycle and not in `excluding`.
    ///
    /// When every remaining candidate is excluded, falls back to the first
    /// photo. Returns `None` only for an empty pool.
    pub fn random_photo(&mut self, excluding: &HashSet<u32>) -> Option<RewardPhoto> {
        if self.available.is_empty() {
            self.reset_available();
        }

        let candidates: Vec<u32> = self
            .available
            .iter()
            .copied()
            .filter(|id| !excluding.contains(id))
            .collect();

        if candidates.is_empty() {
            return self.photos.first().cloned();
        }

        let pick = candidates[rand::thread_rng().gen_range(0..candidates.len())];
        self.available.retain(|id| *id != pick);
        self.unlocked.insert(pick);
        self.photos.iter().find(|photo| photo.id == pick).cloned()
    }

    /// Photos unlocked since the pool was created.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    fn reset_available(&mut self) {
        self.available = self.photos.iter().map(|photo| photo.id).collect();
    }
}

impl Default for RewardPhotoPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_do_not_repeat_until_exhaustion() {
        let mut pool = RewardPhotoPool::with_count(5);
        let none = HashSet::new();
        let mut seen = HashSet::new();
        for _ in 0..5 {
            let photo = pool.random_photo(&none).expect("pool not empty");
            assert!(seen.insert(photo.id), "photo repeated before exhaustion");
        }
        assert_eq!(pool.unlocked_count(), 5);

        // Pool resets after exhaustion and keeps serving.
        assert!(pool.random_photo(&none).is_some());
    }

    #[test]
    fn exclusion_set_is_honored_while_alternatives_remain() {
        let mut pool = RewardPhotoPool::with_count(3);
        let excluding: HashSet<u32> = [1, 2].into_iter().collect();
        let photo = pool.random_photo(&excluding).expect("pool not empty");
        assert_eq!(photo.id, 3);
    }

    #[test]
    fn fully_excluded_pool_falls_back_to_first_photo() {
        let mut pool = RewardPhotoPool::with_count(2);
        let excluding: HashSet<u32> = [1, 2].into_iter().collect();
        let photo = pool.random_photo(&excluding).expect("fallback");
        assert_eq!(photo.id, 1);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut pool = RewardPhotoPool::with_count(0);
        assert!(pool.random_photo(&HashSet::new()).is_none());
    }
}
