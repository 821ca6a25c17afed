// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily task model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// What kind of activity completes a daily task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TaskType {
    Login,
    Create,
    Share,
}

/// A per-day checklist item that grants XP once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_reward: u64,
    pub completed: bool,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// Persisted task list for one calendar day.
///
/// Stored at: `users/{user_id}/daily_tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTaskList {
    /// Day key ("YYYY-MM-DD")
    pub date: String,
    pub tasks: Vec<DailyTask>,
}

impl DailyTaskList {
    pub fn is_for(&self, day_key: &str) -> bool {
        self.date == day_key
    }

    /// Mark `task_id` completed.
    ///
    /// Returns the updated task, or `None` when the task is unknown or was
    /// already completed.
    pub fn complete(&mut self, task_id: &str) -> Option<DailyTask> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id && !t.completed)?;
        task.completed = true;
        Some(task.clone())
    }
}
