// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! XP and level results returned to callers.

use crate::models::DailyTask;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Outcome of crediting XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct XpUpdate {
    /// Total XP after the credit
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp: u64,
    /// Level derived from `xp`
    pub level: u32,
    /// Whether `level` exceeds the previously persisted level
    pub leveled_up: bool,
}

/// Everything the profile screen shows about a user's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressSummary {
    pub level: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp: u64,
    /// Earned badge IDs, in award order
    pub badges: Vec<String>,
    pub streak: u32,
    /// Today's daily tasks
    pub tasks: Vec<DailyTask>,
    /// XP threshold of the current level
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub current_level_xp: u64,
    /// XP threshold of the next level (last threshold at max level)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub next_level_xp: u64,
}
