// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed progress operations over a [`KeyValueStore`].
//!
//! Provides reads and writes for each slice of a user's progress:
//! - Level and XP
//! - Earned badges
//! - Today's daily task list
//! - Streak counter and last activity day
//!
//! Reads of absent keys return the slice's default. Each write touches one
//! key; there is no cross-key transaction.

use crate::db::{keys, KeyValueStore};
use crate::error::AppError;
use crate::models::DailyTaskList;
use crate::time_utils::{format_day_key, parse_day_key};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Progress database over a shared key-value store.
#[derive(Clone)]
pub struct ProgressDb {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressDb {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Full store key for one of a user's progress keys.
    pub fn user_key(user_id: &str, key: &str) -> String {
        format!("users/{}/{}", user_id, key)
    }

    // ─── Generic JSON Helpers ────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<T>, AppError> {
        let full_key = Self::user_key(user_id, key);
        let Some(raw) = self.store.get(&full_key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Failed to decode {}: {}", full_key, e)))
    }

    async fn set_json<T: Serialize + ?Sized>(
        &self,
        user_id: &str,
        key: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let full_key = Self::user_key(user_id, key);
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", full_key, e)))?;
        self.store.set(&full_key, raw).await?;
        Ok(())
    }

    // ─── Level & XP ──────────────────────────────────────────────

    /// Persisted level, 1 when absent.
    pub async fn get_level(&self, user_id: &str) -> Result<u32, AppError> {
        Ok(self
            .get_json::<u32>(user_id, keys::USER_LEVEL)
            .await?
            .unwrap_or(1)
            .max(1))
    }

    pub async fn set_level(&self, user_id: &str, level: u32) -> Result<(), AppError> {
        self.set_json(user_id, keys::USER_LEVEL, &level).await
    }

    /// Persisted XP, 0 when absent.
    pub async fn get_xp(&self, user_id: &str) -> Result<u64, AppError> {
        Ok(self
            .get_json::<u64>(user_id, keys::USER_XP)
            .await?
            .unwrap_or(0))
    }

    pub async fn set_xp(&self, user_id: &str, xp: u64) -> Result<(), AppError> {
        self.set_json(user_id, keys::USER_XP, &xp).await
    }

    // ─── Badges ──────────────────────────────────────────────────

    /// Earned badge IDs in award order.
    pub async fn get_badges(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self
            .get_json::<Vec<String>>(user_id, keys::USER_BADGES)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_badges(&self, user_id: &str, badges: &[String]) -> Result<(), AppError> {
        self.set_json(user_id, keys::USER_BADGES, badges).await
    }

    // ─── Daily Tasks ─────────────────────────────────────────────

    /// Stored task list, whatever day it belongs to.
    pub async fn get_daily_tasks(
        &self,
        user_id: &str,
    ) -> Result<Option<DailyTaskList>, AppError> {
        self.get_json(user_id, keys::DAILY_TASKS).await
    }

    /// Replace the stored task list (discarding any previous day's list).
    pub async fn set_daily_tasks(
        &self,
        user_id: &str,
        list: &DailyTaskList,
    ) -> Result<(), AppError> {
        self.set_json(user_id, keys::DAILY_TASKS, list).await
    }

    // ─── Streak ──────────────────────────────────────────────────

    /// Persisted streak, 0 when absent.
    pub async fn get_streak(&self, user_id: &str) -> Result<u32, AppError> {
        Ok(self
            .get_json::<u32>(user_id, keys::STREAK)
            .await?
            .unwrap_or(0))
    }

    pub async fn set_streak(&self, user_id: &str, streak: u32) -> Result<(), AppError> {
        self.set_json(user_id, keys::STREAK, &streak).await
    }

    /// Last day with recorded activity.
    ///
    /// Older clients stored a bare date string such as `Sat Oct 17 2026`
    /// rather than JSON, so the raw text is used when it does not decode.
    /// A value that is not a day key is treated as no history.
    pub async fn get_last_activity(&self, user_id: &str) -> Result<Option<NaiveDate>, AppError> {
        let full_key = Self::user_key(user_id, keys::LAST_ACTIVITY);
        let Some(raw) = self.store.get(&full_key).await? else {
            return Ok(None);
        };

        let value =
            serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
        let day = parse_day_key(&value);
        if day.is_none() {
            tracing::warn!(user_id, value = %raw, "Unrecognized last activity day, ignoring");
        }
        Ok(day)
    }

    pub async fn set_last_activity(&self, user_id: &str, day: NaiveDate) -> Result<(), AppError> {
        self.set_json(user_id, keys::LAST_ACTIVITY, &format_day_key(day))
            .await
    }

    // ─── Reset ───────────────────────────────────────────────────

    /// Delete every progress key for a user.
    ///
    /// Returns the number of keys that existed.
    pub async fn delete_user_progress(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        for key in keys::ALL {
            let full_key = Self::user_key(user_id, key);
            if self.store.get(&full_key).await?.is_some() {
                deleted_count += 1;
            }
            self.store.remove(&full_key).await?;
        }

        tracing::info!(user_id, deleted_count, "User progress deleted");
        Ok(deleted_count)
    }
}
