// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: a string-keyed async key-value store and typed
//! progress operations on top of it.

pub mod file;
pub mod memory;
pub mod progress;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use progress::ProgressDb;

use crate::error::AppError;
use futures_util::future::BoxFuture;

/// Per-user progress keys. Stored as `users/{user_id}/{key}`.
pub mod keys {
    pub const USER_LEVEL: &str = "user_level";
    pub const USER_XP: &str = "user_xp";
    pub const USER_BADGES: &str = "user_badges";
    pub const DAILY_TASKS: &str = "daily_tasks";
    pub const STREAK: &str = "user_streak";
    pub const LAST_ACTIVITY: &str = "last_activity";

    /// Every key owned by a user's progress, for reset.
    pub const ALL: [&str; 6] = [
        USER_LEVEL,
        USER_XP,
        USER_BADGES,
        DAILY_TASKS,
        STREAK,
        LAST_ACTIVITY,
    ];
}

/// Asynchronous string-keyed store holding JSON text values.
///
/// Implementations must be safe to share across tasks. No operation spans
/// more than one key; callers needing read-modify-write atomicity serialize
/// access themselves.
pub trait KeyValueStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StoreError>>;

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Key-value store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}
