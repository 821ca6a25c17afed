// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar-day helpers and the clock abstraction used by streaks and daily tasks.

use chrono::{FixedOffset, Local, NaiveDate, Utc};
use std::sync::Mutex;

/// Format of the persisted day key ("2026-10-17").
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of "today" for day-granular bookkeeping.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, either host-local or pinned to a fixed UTC offset.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Clock that follows the host's local timezone.
    pub fn local() -> Self {
        Self { offset: None }
    }

    /// Clock that computes days at a fixed offset from UTC.
    ///
    /// Returns `None` when the offset is out of range.
    pub fn with_utc_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes * 60).map(|offset| Self {
            offset: Some(offset),
        })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// Manually advanced clock for tests and simulations.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, day: NaiveDate) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = day;
    }

    /// Move the clock forward by `days` calendar days.
    pub fn advance_days(&self, days: i64) {
        let mut today = self.today.lock().unwrap_or_else(|e| e.into_inner());
        *today += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Render a calendar day as the persisted day key.
pub fn format_day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// Parse a persisted day key. Returns `None` for anything unrecognized.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT).ok()
}
