// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Haptic and sound cues fired on progress milestones.
//!
//! Cues are fire-and-forget: the gamification service emits them after the
//! state change is persisted and only logs a failed emit.

use serde::Serialize;

/// Haptic pattern requested from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Haptic {
    Medium,
    Heavy,
    Success,
}

/// Sound effect requested from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Success,
    Achievement,
}

/// A progress milestone worth signalling to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackCue {
    LevelUp { level: u32 },
    BadgeEarned { badge_ids: Vec<String> },
    TaskCompleted { task_id: String },
}

impl FeedbackCue {
    pub fn haptic(&self) -> Haptic {
        match self {
            FeedbackCue::LevelUp { .. } => Haptic::Heavy,
            FeedbackCue::BadgeEarned { .. } => Haptic::Success,
            FeedbackCue::TaskCompleted { .. } => Haptic::Medium,
        }
    }

    pub fn sound(&self) -> Sound {
        match self {
            FeedbackCue::LevelUp { .. } | FeedbackCue::BadgeEarned { .. } => Sound::Achievement,
            FeedbackCue::TaskCompleted { .. } => Sound::Success,
        }
    }
}

/// Feedback errors
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Feedback unavailable: {0}")]
    Unavailable(String),
}

/// Receiver of milestone cues (device haptics/audio, or a log).
pub trait FeedbackSink: Send + Sync {
    fn emit(&self, cue: &FeedbackCue) -> Result<(), FeedbackError>;
}

/// Sink that records cues as tracing events. Used by the server, which has
/// no device to buzz.
#[derive(Debug, Clone, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn emit(&self, cue: &FeedbackCue) -> Result<(), FeedbackError> {
        tracing::debug!(
            cue = ?cue,
            haptic = ?cue.haptic(),
            sound = ?cue.sound(),
            "Feedback cue"
        );
        Ok(())
    }
}
