// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! XP thresholds, level derivation, and XP action values.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Total XP required to reach each level; index `i` is level `i + 1`.
///
/// Must start at 0 and be strictly ascending.
pub const LEVEL_REQUIREMENTS: [u64; 10] = [0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700];

/// Highest reachable level. XP beyond the last threshold stays here.
pub const MAX_LEVEL: u32 = LEVEL_REQUIREMENTS.len() as u32;

/// Level for a total XP amount.
///
/// `level(xp) = 1 + max{ i : T[i] <= xp }`, so it never decreases as XP grows.
pub fn level_for_xp(xp: u64) -> u32 {
    // partition_point counts thresholds <= xp; T[0] = 0 makes it at least 1.
    LEVEL_REQUIREMENTS.partition_point(|&threshold| threshold <= xp) as u32
}

/// XP window of a level: `(threshold of level, threshold of next level)`.
///
/// At the max level both ends of the window report the last threshold as
/// the "next" value, matching what the profile screen displays.
pub fn level_progress(level: u32) -> (u64, u64) {
    let level = level.clamp(1, MAX_LEVEL) as usize;
    let current = LEVEL_REQUIREMENTS[level - 1];
    let next = LEVEL_REQUIREMENTS
        .get(level)
        .copied()
        .unwrap_or(LEVEL_REQUIREMENTS[LEVEL_REQUIREMENTS.len() - 1]);
    (current, next)
}

/// User actions with a fixed XP value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum XpAction {
    CreateImage,
    ShareImage,
    LikeImage,
    CommentImage,
    DailyLogin,
    CompleteProfile,
    FirstImage,
}

impl XpAction {
    pub fn xp_value(self) -> u64 {
        match self {
            XpAction::CreateImage => 50,
            XpAction::ShareImage => 25,
            XpAction::LikeImage => 5,
            XpAction::CommentImage => 10,
            XpAction::DailyLogin => 20,
            XpAction::CompleteProfile => 100,
            XpAction::FirstImage => 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_start_at_zero_and_ascend() {
        assert_eq!(LEVEL_REQUIREMENTS[0], 0);
        assert!(LEVEL_REQUIREMENTS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(249), 2);
        assert_eq!(level_for_xp(250), 3);
        assert_eq!(level_for_xp(2699), 9);
        assert_eq!(level_for_xp(2700), 10);
    }

    #[test]
    fn test_level_clamped_at_max() {
        assert_eq!(level_for_xp(2701), MAX_LEVEL);
        assert_eq!(level_for_xp(u64::MAX), MAX_LEVEL);
    }

    #[test]
    fn test_level_is_non_decreasing() {
        let mut previous = level_for_xp(0);
        for xp in 1..=3000 {
            let level = level_for_xp(xp);
            assert!(level >= previous, "level dropped at xp={}", xp);
            previous = level;
        }
    }

    #[test]
    fn test_level_matches_threshold_window() {
        for xp in (0..3000).step_by(7) {
            let level = level_for_xp(xp) as usize;
            assert!(LEVEL_REQUIREMENTS[level - 1] <= xp);
            if let Some(&next) = LEVEL_REQUIREMENTS.get(level) {
                assert!(xp < next);
            }
        }
    }

    #[test]
    fn test_level_progress_window() {
        assert_eq!(level_progress(1), (0, 100));
        assert_eq!(level_progress(2), (100, 250));
        assert_eq!(level_progress(MAX_LEVEL), (2700, 2700));
        // Out-of-range persisted levels are clamped
        assert_eq!(level_progress(0), (0, 100));
        assert_eq!(level_progress(42), (2700, 2700));
    }

    #[test]
    fn test_action_values() {
        assert_eq!(XpAction::CreateImage.xp_value(), 50);
        assert_eq!(XpAction::FirstImage.xp_value(), 200);

        let action: XpAction = serde_json::from_str("\"SHARE_IMAGE\"").unwrap();
        assert_eq!(action, XpAction::ShareImage);
        assert_eq!(action.xp_value(), 25);
    }
}
