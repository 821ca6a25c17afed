// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod badges;
pub mod daily_tasks;
pub mod feedback;
pub mod gamification;
pub mod leveling;
pub mod streak;

pub use feedback::{FeedbackCue, FeedbackError, FeedbackSink, LogFeedback};
pub use gamification::GamificationService;
pub use leveling::{level_for_xp, XpAction, LEVEL_REQUIREMENTS, MAX_LEVEL};
pub use streak::StreakTransition;
