// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store and feedback failures surface (or not) as documented.

use historicme_progress::db::{FileStore, KeyValueStore, ProgressDb};
use historicme_progress::models::UserStats;
use historicme_progress::services::{GamificationService, LogFeedback};
use historicme_progress::time_utils::FixedClock;
use std::sync::Arc;

mod common;
use common::{start_day, test_harness, test_service_with_failing_feedback};

const USER: &str = "user_1";

#[tokio::test]
async fn test_write_failure_is_reported_not_defaulted() {
    let h = test_harness();
    h.service.add_xp(USER, 40).await.unwrap();

    h.store.set_fail_writes(true);
    let err = h.service.add_xp(USER, 100).await.unwrap_err();
    assert!(err.is_storage_error());

    // Previous progress is still readable and untouched
    h.store.set_fail_writes(false);
    assert_eq!(h.service.get_xp(USER).await.unwrap(), 40);
}

#[tokio::test]
async fn test_streak_write_failure_is_reported() {
    let h = test_harness();
    h.store.set_fail_writes(true);

    let err = h.service.update_streak(USER).await.unwrap_err();
    assert!(err.is_storage_error());
}

/// Seed a four-day streak whose last activity was the day before `start_day`.
async fn seed_streak(h: &common::TestHarness) {
    h.store
        .set("users/user_1/user_streak", "4".to_string())
        .await
        .unwrap();
    h.store
        .set("users/user_1/last_activity", "\"2026-10-16\"".to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_streak_counts_day_once_when_day_write_fails() {
    let h = test_harness();
    seed_streak(&h).await;

    // Streak write succeeds, last activity write fails
    h.store.fail_nth_write(2);
    let err = h.service.update_streak(USER).await.unwrap_err();
    assert!(err.is_storage_error());
    assert_eq!(h.service.get_streak(USER).await.unwrap(), 4);

    assert_eq!(h.service.update_streak(USER).await.unwrap(), 5);
    assert_eq!(h.service.update_streak(USER).await.unwrap(), 5);
    assert_eq!(
        h.store.raw("users/user_1/last_activity"),
        Some("\"2026-10-17\"".to_string())
    );
}

#[tokio::test]
async fn test_streak_unchanged_when_streak_write_fails() {
    let h = test_harness();
    seed_streak(&h).await;

    h.store.fail_nth_write(1);
    assert!(h.service.update_streak(USER).await.is_err());
    assert_eq!(h.service.get_streak(USER).await.unwrap(), 4);
    assert_eq!(
        h.store.raw("users/user_1/last_activity"),
        Some("\"2026-10-16\"".to_string())
    );

    assert_eq!(h.service.update_streak(USER).await.unwrap(), 5);
}

#[tokio::test]
async fn test_legacy_last_activity_restarts_streak() {
    let h = test_harness();
    h.store
        .set("users/user_1/user_streak", "4".to_string())
        .await
        .unwrap();
    h.store
        .set("users/user_1/last_activity", "Fri Oct 16 2026".to_string())
        .await
        .unwrap();

    assert_eq!(h.service.update_streak(USER).await.unwrap(), 1);
    assert_eq!(h.service.update_streak(USER).await.unwrap(), 1);
    assert_eq!(
        h.store.raw("users/user_1/last_activity"),
        Some("\"2026-10-17\"".to_string())
    );
}

#[tokio::test]
async fn test_task_reopened_when_xp_write_fails() {
    let h = test_harness();
    h.service.get_daily_tasks(USER).await.unwrap();

    // Task list write succeeds, XP write fails
    h.store.fail_nth_write(2);
    let err = h
        .service
        .complete_daily_task(USER, "share_image")
        .await
        .unwrap_err();
    assert!(err.is_storage_error());

    let tasks = h.service.get_daily_tasks(USER).await.unwrap();
    assert!(tasks.iter().all(|t| !t.completed));
    assert_eq!(h.service.get_xp(USER).await.unwrap(), 0);

    let task = h
        .service
        .complete_daily_task(USER, "share_image")
        .await
        .unwrap();
    assert!(task.is_some());
    let again = h
        .service
        .complete_daily_task(USER, "share_image")
        .await
        .unwrap();
    assert!(again.is_none());
    assert_eq!(h.service.get_xp(USER).await.unwrap(), 25);
}

#[tokio::test]
async fn test_uncredited_badges_retried_after_failure() {
    let h = test_harness();
    let stats = UserStats {
        total_creations: 1,
        total_shares: 10,
        eras_used: 0,
        current_streak: 0,
    };

    // Badge set and first_steps credit succeed; social_butterfly's level
    // write fails
    h.store.fail_nth_write(3);
    let err = h.service.check_badges(USER, &stats).await.unwrap_err();
    assert!(err.is_storage_error());
    assert_eq!(h.service.get_badges(USER).await.unwrap(), vec!["first_steps"]);
    assert_eq!(h.service.get_xp(USER).await.unwrap(), 50);

    let check = h.service.check_badges(USER, &stats).await.unwrap();
    assert_eq!(check.awarded_ids(), vec!["social_butterfly"]);
    assert_eq!(check.xp.map(|u| (u.xp, u.level, u.leveled_up)), Some((150, 2, true)));

    let check = h.service.check_badges(USER, &stats).await.unwrap();
    assert!(check.awarded.is_empty());
    assert_eq!(h.service.get_xp(USER).await.unwrap(), 150);
}

#[tokio::test]
async fn test_corrupt_value_is_reported() {
    let h = test_harness();
    h.store
        .set("users/user_1/user_xp", "\"lots\"".to_string())
        .await
        .unwrap();

    let err = h.service.add_xp(USER, 10).await.unwrap_err();
    assert!(err.is_storage_error());
}

#[tokio::test]
async fn test_feedback_failure_does_not_abort_updates() {
    let service = test_service_with_failing_feedback();

    let update = service.add_xp(USER, 120).await.unwrap();
    assert!(update.leveled_up);

    let check = service
        .check_badges(USER, &UserStats::with_creations(1))
        .await
        .unwrap();
    assert_eq!(check.awarded_ids(), vec!["first_steps"]);

    let task = service.complete_daily_task(USER, "daily_login").await.unwrap();
    assert!(task.is_some());

    assert_eq!(service.get_xp(USER).await.unwrap(), 190);
}

#[tokio::test]
async fn test_progress_survives_restart_with_file_store() {
    let dir = std::env::temp_dir().join(format!(
        "historicme-restart-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let path = dir.join("progress.json");

    let make_service = |store: FileStore| {
        GamificationService::new(
            ProgressDb::new(Arc::new(store)),
            Arc::new(FixedClock::new(start_day())),
            Arc::new(LogFeedback),
        )
    };

    let service = make_service(FileStore::open(&path).await.unwrap());
    service.add_xp(USER, 300).await.unwrap();
    service.update_streak(USER).await.unwrap();
    service
        .complete_daily_task(USER, "create_image")
        .await
        .unwrap();

    let restarted = make_service(FileStore::open(&path).await.unwrap());
    let summary = restarted.get_summary(USER).await.unwrap();
    assert_eq!(summary.xp, 350);
    assert_eq!(summary.level, 3);
    assert_eq!(summary.streak, 1);
    assert!(summary.tasks.iter().any(|t| t.id == "create_image" && t.completed));

    let _ = std::fs::remove_dir_all(&dir);
}
