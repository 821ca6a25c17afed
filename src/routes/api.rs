// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{BadgeCheck, BadgeSummary, DailyTask, ProgressSummary, UserStats, XpUpdate};
use crate::services::XpAction;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Largest XP amount a single request may credit.
const MAX_XP_PER_REQUEST: u64 = 10_000;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(get_progress).delete(reset_progress))
        .route("/api/progress/xp", post(add_xp))
        .route("/api/badges", get(list_badges))
        .route("/api/badges/check", post(check_badges))
        .route("/api/tasks/daily", get(get_daily_tasks))
        .route(
            "/api/tasks/daily/{task_id}/complete",
            post(complete_daily_task),
        )
        .route("/api/streak", post(update_streak))
}

/// Reject request bodies that fail their field constraints.
fn validate_body<T: Validate>(body: &T) -> Result<()> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ─── Progress ────────────────────────────────────────────────

/// Get the user's level, XP, badges, streak and today's tasks.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressSummary>> {
    let summary = state.gamification.get_summary(&user.user_id).await?;
    Ok(Json(summary))
}

/// Response for progress reset.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResetResponse {
    pub success: bool,
}

/// Delete all of the user's progress.
async fn reset_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ResetResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated progress reset");
    state.gamification.reset_progress(&user.user_id).await?;
    Ok(Json(ResetResponse { success: true }))
}

/// XP credit request: either a raw amount or a named action.
#[derive(Debug, Deserialize, Validate)]
pub struct AddXpRequest {
    #[validate(range(min = 1, max = MAX_XP_PER_REQUEST))]
    pub amount: Option<u64>,
    pub action: Option<XpAction>,
}

/// Credit XP to the user.
async fn add_xp(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddXpRequest>,
) -> Result<Json<XpUpdate>> {
    validate_body(&body)?;

    let update = match (body.amount, body.action) {
        (Some(amount), None) => state.gamification.add_xp(&user.user_id, amount).await?,
        (None, Some(action)) => {
            state
                .gamification
                .award_action(&user.user_id, action)
                .await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of 'amount' or 'action'".to_string(),
            ))
        }
    };

    Ok(Json(update))
}

// ─── Badges ──────────────────────────────────────────────────

/// List all badges with the user's earned flags.
async fn list_badges(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BadgeSummary>>> {
    let badges = state.gamification.list_badges(&user.user_id).await?;
    Ok(Json(badges))
}

/// Evaluate badges against a stats snapshot and award new ones.
async fn check_badges(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(stats): Json<UserStats>,
) -> Result<Json<BadgeCheck>> {
    validate_body(&stats)?;

    let result = state
        .gamification
        .check_badges(&user.user_id, &stats)
        .await?;
    Ok(Json(result))
}

// ─── Daily Tasks ─────────────────────────────────────────────

/// Get today's daily tasks.
async fn get_daily_tasks(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<DailyTask>>> {
    let tasks = state.gamification.get_daily_tasks(&user.user_id).await?;
    Ok(Json(tasks))
}

/// Complete one of today's tasks.
async fn complete_daily_task(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(task_id): Path<String>,
) -> Result<Json<DailyTask>> {
    let task = state
        .gamification
        .complete_daily_task(&user.user_id, &task_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Task {} not found or already completed",
                task_id
            ))
        })?;

    Ok(Json(task))
}

// ─── Streak ──────────────────────────────────────────────────

/// Response for streak updates.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakResponse {
    pub streak: u32,
}

/// Record today's activity and return the streak.
async fn update_streak(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StreakResponse>> {
    let streak = state.gamification.update_streak(&user.user_id).await?;
    Ok(Json(StreakResponse { streak }))
}
