// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! HistoricMe progress: XP, levels, badges, daily tasks and streaks
//!
//! This crate provides the gamification bookkeeping for the HistoricMe app,
//! persisted in a string-keyed JSON store, and a small HTTP API serving it
//! per authenticated user.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::GamificationService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gamification: GamificationService,
}
