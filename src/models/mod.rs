// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod badge;
pub mod progress;
pub mod stats;
pub mod task;

pub use badge::{BadgeCheck, BadgeDefinition, BadgeSummary};
pub use progress::{ProgressSummary, XpUpdate};
pub use stats::UserStats;
pub use task::{DailyTask, DailyTaskList, TaskType};
