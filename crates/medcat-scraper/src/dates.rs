//! Synthetic lifecycle dates.
//!
//! The storefront publishes no creation or expiry dates, so every exported
//! product gets randomly placed ones. The randomness sits behind
//! [`DayOffsetSource`] so tests can pin it.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};

/// How far before "now" a product may have been created.
pub const CREATE_WINDOW_DAYS: RangeInclusive<i64> = 0..=180;

/// Shelf life added on top of the creation date.
pub const SHELF_LIFE_DAYS: RangeInclusive<i64> = 365..=720;

/// Source of whole-day offsets.
pub trait DayOffsetSource {
    /// Returns a value within `range` (inclusive on both ends).
    fn offset_days(&mut self, range: RangeInclusive<i64>) -> i64;
}

impl<R: rand::Rng + ?Sized> DayOffsetSource for R {
    fn offset_days(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.random_range(range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleDates {
    pub create: DateTime<Utc>,
    pub expired: DateTime<Utc>,
}

impl LifecycleDates {
    /// `create` = `now` minus 0..=180 days, `expired` = `create` plus
    /// 365..=720 days.
    pub fn generate<S: DayOffsetSource + ?Sized>(now: DateTime<Utc>, source: &mut S) -> Self {
        let create = now - Duration::days(source.offset_days(CREATE_WINDOW_DAYS));
        let expired = create + Duration::days(source.offset_days(SHELF_LIFE_DAYS));
        Self { create, expired }
    }
}
