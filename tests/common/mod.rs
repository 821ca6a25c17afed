// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use historicme_progress::config::Config;
use historicme_progress::db::{MemoryStore, ProgressDb};
use historicme_progress::routes::create_router;
use historicme_progress::services::{
    FeedbackCue, FeedbackError, FeedbackSink, GamificationService, LogFeedback,
};
use historicme_progress::time_utils::FixedClock;
use historicme_progress::AppState;
use std::sync::{Arc, Mutex};

/// Day every test clock starts on.
#[allow(dead_code)]
pub fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

/// Feedback sink that remembers every cue.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingFeedback {
    cues: Mutex<Vec<FeedbackCue>>,
}

#[allow(dead_code)]
impl RecordingFeedback {
    pub fn cues(&self) -> Vec<FeedbackCue> {
        self.cues.lock().unwrap().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn emit(&self, cue: &FeedbackCue) -> Result<(), FeedbackError> {
        self.cues.lock().unwrap().push(cue.clone());
        Ok(())
    }
}

/// Feedback sink whose device is always unavailable.
#[allow(dead_code)]
pub struct FailingFeedback;

impl FeedbackSink for FailingFeedback {
    fn emit(&self, _cue: &FeedbackCue) -> Result<(), FeedbackError> {
        Err(FeedbackError::Unavailable("no haptics engine".to_string()))
    }
}

/// Service over an in-memory store with a controllable clock.
#[allow(dead_code)]
pub struct TestHarness {
    pub service: GamificationService,
    pub store: MemoryStore,
    pub clock: Arc<FixedClock>,
    pub feedback: Arc<RecordingFeedback>,
}

#[allow(dead_code)]
pub fn test_harness() -> TestHarness {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(start_day()));
    let feedback = Arc::new(RecordingFeedback::default());

    let service = GamificationService::new(
        ProgressDb::new(Arc::new(store.clone())),
        clock.clone(),
        feedback.clone(),
    );

    TestHarness {
        service,
        store,
        clock,
        feedback,
    }
}

/// Service whose feedback collaborator always fails.
#[allow(dead_code)]
pub fn test_service_with_failing_feedback() -> GamificationService {
    GamificationService::new(
        ProgressDb::new(Arc::new(MemoryStore::new())),
        Arc::new(FixedClock::new(start_day())),
        Arc::new(FailingFeedback),
    )
}

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let gamification = GamificationService::new(
        ProgressDb::new(Arc::new(MemoryStore::new())),
        Arc::new(FixedClock::new(start_day())),
        Arc::new(LogFeedback),
    );

    let state = Arc::new(AppState {
        config,
        gamification,
    });

    (create_router(state.clone()), state)
}

/// Create a test JWT for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    historicme_progress::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create JWT")
}
