// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gamification service.
//!
//! Orchestrates the per-user read-modify-write cycles:
//! 1. XP credits and level-ups
//! 2. Badge evaluation and awards
//! 3. Daily task generation and completion
//! 4. Streak updates
//!
//! All mutable state lives in the store. The service only holds shared
//! handles, so clones are cheap and interchangeable.

use crate::db::ProgressDb;
use crate::error::Result;
use crate::models::{
    BadgeCheck, BadgeDefinition, BadgeSummary, DailyTask, DailyTaskList, ProgressSummary,
    UserStats, XpUpdate,
};
use crate::services::badges::{evaluate_badges, BADGES};
use crate::services::daily_tasks::generate_daily_tasks;
use crate::services::feedback::{FeedbackCue, FeedbackSink};
use crate::services::leveling::{level_for_xp, level_progress, XpAction};
use crate::services::streak::StreakTransition;
use crate::time_utils::{format_day_key, Clock};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-user mutex serializing progress mutations.
///
/// Holds an entry only while some task holds or waits for that user's lock.
pub type UserLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Held user lock. Dropping it releases the lock and forgets the user's
/// entry once nobody else is holding or waiting on it.
struct UserGuard {
    locks: UserLocks,
    user_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Clones are made under the shard lock, so a count of 1 means no waiters
        self.locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Gamification bookkeeping for all users of one store.
///
/// Every mutator holds the user's lock for its whole read-modify-write
/// cycle, so concurrent credits for one user never lose an update. Users
/// do not contend with each other.
#[derive(Clone)]
pub struct GamificationService {
    db: ProgressDb,
    clock: Arc<dyn Clock>,
    feedback: Arc<dyn FeedbackSink>,
    locks: UserLocks,
}

impl GamificationService {
    pub fn new(db: ProgressDb, clock: Arc<dyn Clock>, feedback: Arc<dyn FeedbackSink>) -> Self {
        Self {
            db,
            clock,
            feedback,
            locks: Arc::new(DashMap::new()),
        }
    }

    async fn lock_user(&self, user_id: &str) -> UserGuard {
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        UserGuard {
            locks: self.locks.clone(),
            user_id: user_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Fire a cue; failures are logged and otherwise ignored.
    fn emit(&self, user_id: &str, cue: FeedbackCue) {
        if let Err(e) = self.feedback.emit(&cue) {
            tracing::warn!(user_id, cue = ?cue, error = %e, "Feedback cue failed");
        }
    }

    fn today_key(&self) -> String {
        format_day_key(self.clock.today())
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Level derived from stored XP.
    pub async fn get_level(&self, user_id: &str) -> Result<u32> {
        Ok(level_for_xp(self.db.get_xp(user_id).await?))
    }

    pub async fn get_xp(&self, user_id: &str) -> Result<u64> {
        self.db.get_xp(user_id).await
    }

    pub async fn get_badges(&self, user_id: &str) -> Result<Vec<String>> {
        self.db.get_badges(user_id).await
    }

    pub async fn get_streak(&self, user_id: &str) -> Result<u32> {
        self.db.get_streak(user_id).await
    }

    /// All badge definitions with the user's earned flags.
    pub async fn list_badges(&self, user_id: &str) -> Result<Vec<BadgeSummary>> {
        let owned = self.db.get_badges(user_id).await?;
        Ok(BADGES
            .iter()
            .map(|badge| BadgeSummary::new(badge, owned.iter().any(|id| id == badge.id)))
            .collect())
    }

    /// Level, XP, badges, streak, today's tasks and the current level window.
    pub async fn get_summary(&self, user_id: &str) -> Result<ProgressSummary> {
        let _guard = self.lock_user(user_id).await;

        let xp = self.db.get_xp(user_id).await?;
        let level = level_for_xp(xp);
        let (current_level_xp, next_level_xp) = level_progress(level);

        Ok(ProgressSummary {
            level,
            xp,
            badges: self.db.get_badges(user_id).await?,
            streak: self.db.get_streak(user_id).await?,
            tasks: self.load_today_tasks(user_id).await?.tasks,
            current_level_xp,
            next_level_xp,
        })
    }

    // ─── Leveling ────────────────────────────────────────────────

    /// Credit `amount` XP and report whether the user leveled up.
    pub async fn add_xp(&self, user_id: &str, amount: u64) -> Result<XpUpdate> {
        let _guard = self.lock_user(user_id).await;
        self.credit_xp(user_id, amount).await
    }

    /// Credit the fixed XP value of `action`.
    pub async fn award_action(&self, user_id: &str, action: XpAction) -> Result<XpUpdate> {
        tracing::debug!(user_id, action = ?action, "Awarding action XP");
        self.add_xp(user_id, action.xp_value()).await
    }

    /// XP credit without taking the user lock. Caller must hold it.
    ///
    /// The XP write is the last one, so an error means no XP was credited.
    /// The stored level is a mirror of XP and is brought in line first.
    async fn credit_xp(&self, user_id: &str, amount: u64) -> Result<XpUpdate> {
        let current_xp = self.db.get_xp(user_id).await?;
        let current_level = level_for_xp(current_xp);

        let xp = current_xp.saturating_add(amount);
        let level = level_for_xp(xp);
        let leveled_up = level > current_level;

        if self.db.get_level(user_id).await? != level {
            self.db.set_level(user_id, level).await?;
        }
        self.db.set_xp(user_id, xp).await?;

        if leveled_up {
            tracing::info!(
                user_id,
                old_level = current_level,
                new_level = level,
                xp,
                "Level up"
            );
            self.emit(user_id, FeedbackCue::LevelUp { level });
        } else {
            tracing::debug!(user_id, amount, xp, level, "XP credited");
        }

        Ok(XpUpdate {
            xp,
            level,
            leveled_up,
        })
    }

    // ─── Badges ──────────────────────────────────────────────────

    /// Award every unowned badge whose condition `stats` satisfies.
    ///
    /// The grown badge set is persisted before any XP is credited. If a
    /// credit fails, the badges not yet credited are taken back so a retry
    /// awards them again, and no badge is ever credited twice.
    pub async fn check_badges(&self, user_id: &str, stats: &UserStats) -> Result<BadgeCheck> {
        let _guard = self.lock_user(user_id).await;

        let owned = self.db.get_badges(user_id).await?;
        let awarded = evaluate_badges(stats, &owned);
        if awarded.is_empty() {
            return Ok(BadgeCheck::none());
        }

        let with_ids = |badges: &[&BadgeDefinition]| {
            let mut ids = owned.clone();
            ids.extend(badges.iter().map(|b| b.id.to_string()));
            ids
        };
        self.db.set_badges(user_id, &with_ids(&awarded[..])).await?;

        let mut leveled_up = false;
        let mut last_update = None;
        for (credited, badge) in awarded.iter().enumerate() {
            let update = match self.credit_xp(user_id, badge.xp_reward).await {
                Ok(update) => update,
                Err(e) => {
                    let kept = with_ids(&awarded[..credited]);
                    if let Err(undo) = self.db.set_badges(user_id, &kept).await {
                        tracing::error!(
                            user_id,
                            error = %undo,
                            "Failed to take back uncredited badges"
                        );
                    }
                    return Err(e);
                }
            };
            leveled_up |= update.leveled_up;
            last_update = Some(update);
        }

        let badge_ids: Vec<String> = awarded.iter().map(|b| b.id.to_string()).collect();
        tracing::info!(user_id, badges = ?badge_ids, "Badges awarded");
        self.emit(user_id, FeedbackCue::BadgeEarned { badge_ids });

        Ok(BadgeCheck {
            awarded: awarded.into_iter().copied().collect(),
            xp: last_update.map(|u| XpUpdate { leveled_up, ..u }),
        })
    }

    // ─── Daily Tasks ─────────────────────────────────────────────

    /// Today's task list, generating it on the first call of the day.
    pub async fn get_daily_tasks(&self, user_id: &str) -> Result<Vec<DailyTask>> {
        let _guard = self.lock_user(user_id).await;
        Ok(self.load_today_tasks(user_id).await?.tasks)
    }

    /// Load today's list or replace a stale one. Caller must hold the lock.
    async fn load_today_tasks(&self, user_id: &str) -> Result<DailyTaskList> {
        let today = self.today_key();

        match self.db.get_daily_tasks(user_id).await? {
            Some(list) if list.is_for(&today) => Ok(list),
            stale => {
                let list = generate_daily_tasks(&today);
                self.db.set_daily_tasks(user_id, &list).await?;
                tracing::info!(
                    user_id,
                    date = %today,
                    previous = ?stale.map(|l| l.date),
                    "Generated daily tasks"
                );
                Ok(list)
            }
        }
    }

    /// Complete one of today's tasks and credit its XP.
    ///
    /// Returns `None`, with nothing persisted, when the task is unknown or
    /// already completed. If the XP credit fails the task is marked open
    /// again.
    pub async fn complete_daily_task(
        &self,
        user_id: &str,
        task_id: &str,
    ) -> Result<Option<DailyTask>> {
        let _guard = self.lock_user(user_id).await;

        let previous = self.load_today_tasks(user_id).await?;
        let mut list = previous.clone();
        let Some(task) = list.complete(task_id) else {
            tracing::debug!(user_id, task_id, "Task unknown or already completed");
            return Ok(None);
        };

        self.db.set_daily_tasks(user_id, &list).await?;
        if let Err(e) = self.credit_xp(user_id, task.xp_reward).await {
            if let Err(undo) = self.db.set_daily_tasks(user_id, &previous).await {
                tracing::error!(user_id, task_id, error = %undo, "Failed to reopen task");
            }
            return Err(e);
        }

        tracing::info!(
            user_id,
            task_id,
            xp_reward = task.xp_reward,
            "Daily task completed"
        );
        self.emit(
            user_id,
            FeedbackCue::TaskCompleted {
                task_id: task.id.clone(),
            },
        );

        Ok(Some(task))
    }

    // ─── Streak ──────────────────────────────────────────────────

    /// Record activity today and return the resulting streak.
    ///
    /// Sole writer of the streak and last activity day. If the day cannot be
    /// written the previous streak is restored, so a retry on the same day
    /// counts the day once.
    pub async fn update_streak(&self, user_id: &str) -> Result<u32> {
        let _guard = self.lock_user(user_id).await;

        let today = self.clock.today();
        let last = self.db.get_last_activity(user_id).await?;
        let current = self.db.get_streak(user_id).await?;

        let transition = StreakTransition::between(today, last);
        let streak = transition.apply(current);

        if transition.persists() {
            self.db.set_streak(user_id, streak).await?;
            if let Err(e) = self.db.set_last_activity(user_id, today).await {
                if let Err(undo) = self.db.set_streak(user_id, current).await {
                    tracing::error!(user_id, error = %undo, "Failed to restore streak");
                }
                return Err(e);
            }
            tracing::info!(user_id, transition = ?transition, streak, "Streak updated");
        }

        Ok(streak)
    }

    // ─── Reset ───────────────────────────────────────────────────

    /// Delete all of a user's progress. The next read starts from defaults.
    pub async fn reset_progress(&self, user_id: &str) -> Result<()> {
        let _guard = self.lock_user(user_id).await;
        self.db.delete_user_progress(user_id).await?;
        Ok(())
    }
}
