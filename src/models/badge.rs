// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge definitions and their API projection.

use crate::models::{UserStats, XpUpdate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A one-time achievement with a predicate over [`UserStats`].
///
/// Definitions are compiled in and never mutated.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Icon name understood by the mobile client
    pub icon: &'static str,
    /// XP credited once when the badge is awarded
    pub xp_reward: u64,
    #[serde(skip)]
    pub condition: fn(&UserStats) -> bool,
}

impl BadgeDefinition {
    /// Evaluate this badge's condition.
    pub fn is_met(&self, stats: &UserStats) -> bool {
        (self.condition)(stats)
    }
}

impl PartialEq for BadgeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BadgeDefinition {}

/// Badge as listed to the client, with the user's earned flag.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BadgeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_reward: u64,
    pub earned: bool,
}

impl BadgeSummary {
    pub fn new(badge: &BadgeDefinition, earned: bool) -> Self {
        Self {
            id: badge.id.to_string(),
            name: badge.name.to_string(),
            description: badge.description.to_string(),
            icon: badge.icon.to_string(),
            xp_reward: badge.xp_reward,
            earned,
        }
    }
}

/// Result of a badge check.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeCheck {
    /// Newly awarded badges, in table order
    pub awarded: Vec<BadgeDefinition>,
    /// XP state after crediting all awards; `None` when nothing was awarded.
    /// `leveled_up` is set if any credit crossed a level threshold.
    pub xp: Option<XpUpdate>,
}

impl BadgeCheck {
    pub fn none() -> Self {
        Self {
            awarded: Vec::new(),
            xp: None,
        }
    }

    pub fn awarded_ids(&self) -> Vec<&'static str> {
        self.awarded.iter().map(|b| b.id).collect()
    }
}
