// ABOUTME: Shared helpers for provider implementations
// ABOUTME: Seeded deterministic generation, calendar-day math, in-flight guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Charlie App Contributors

use crate::observable::StateCell;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_CE_DAYS: i64 = 719_163;

/// Reproducible pseudo-random integers from an integer seed.
///
/// The same seed always yields the same sequence, which is the contract the
/// mock backend's historical backfill relies on.
pub struct SeededGenerator {
    rng: ChaCha8Rng,
}

impl SeededGenerator {
    /// Create a generator for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next value uniformly from `range`.
    pub fn next_in(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.rng.gen_range(range)
    }
}

/// Days since 1970-01-01 for `date`; negative for earlier dates.
#[must_use]
pub fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_CE_DAYS
}

/// Today's calendar date in the local timezone.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local midnight at the start of `date`. DST gaps at midnight fall back to
/// the UTC reading of the same wall-clock instant.
#[must_use]
pub fn start_of_local_day(date: NaiveDate) -> DateTime<Local> {
    let midnight = date.and_time(NaiveTime::MIN);
    midnight
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&midnight))
}

/// Half-open range covering the full local calendar day of `date`.
#[must_use]
pub fn local_day_bounds(date: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
    let start = start_of_local_day(date);
    let end = date
        .succ_opt()
        .map_or_else(|| start + Duration::days(1), start_of_local_day);
    (start, end)
}

/// Half-open range from the start of the current local day to now.
#[must_use]
pub fn today_so_far() -> (DateTime<Local>, DateTime<Local>) {
    let now = Local::now();
    (start_of_local_day(now.date_naive()), now)
}

/// RAII guard for a request-in-flight flag.
///
/// Publishes `true` on construction and `false` when dropped, so the flag
/// resets on every exit path of the guarded request, including early returns
/// and a request future dropped mid-await.
pub struct InFlightGuard {
    cell: StateCell<bool>,
}

impl InFlightGuard {
    /// Raise the flag for the lifetime of the returned guard.
    #[must_use]
    pub fn begin(cell: &StateCell<bool>) -> Self {
        cell.set(true);
        Self { cell: cell.clone() }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.cell.set(false);
    }
}
