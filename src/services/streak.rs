// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-day streak transitions.

use chrono::NaiveDate;

/// How today relates to the last recorded activity day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Activity already recorded today
    Same,
    /// Last activity was yesterday
    Consecutive,
    /// No history, a gap of two or more days, or a last day in the future
    Broken,
}

impl StreakTransition {
    pub fn between(today: NaiveDate, last: Option<NaiveDate>) -> Self {
        let Some(last) = last else {
            return StreakTransition::Broken;
        };

        match (today - last).num_days() {
            0 => StreakTransition::Same,
            1 => StreakTransition::Consecutive,
            _ => StreakTransition::Broken,
        }
    }

    /// Streak value after this transition.
    pub fn apply(self, current: u32) -> u32 {
        match self {
            StreakTransition::Same => current,
            StreakTransition::Consecutive => current.saturating_add(1),
            StreakTransition::Broken => 1,
        }
    }

    /// Whether the transition writes the streak and last activity day.
    pub fn persists(self) -> bool {
        !matches!(self, StreakTransition::Same)
    }
}
