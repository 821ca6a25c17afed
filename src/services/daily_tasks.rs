// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily task template.

use crate::models::{DailyTask, DailyTaskList, TaskType};

/// Fresh task list for a day, all tasks incomplete.
pub fn generate_daily_tasks(day_key: &str) -> DailyTaskList {
    let task = |id: &str, title: &str, description: &str, xp_reward, task_type| DailyTask {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        xp_reward,
        completed: false,
        task_type,
    };

    DailyTaskList {
        date: day_key.to_string(),
        tasks: vec![
            task(
                "daily_login",
                "Daily Login",
                "Open the app",
                20,
                TaskType::Login,
            ),
            task(
                "create_image",
                "Create a Portrait",
                "Generate 1 AI portrait",
                50,
                TaskType::Create,
            ),
            task(
                "share_image",
                "Share",
                "Share 1 portrait",
                25,
                TaskType::Share,
            ),
        ],
    }
}
