// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static badge table and evaluation.

use crate::models::{BadgeDefinition, UserStats};

/// All badges, in evaluation and presentation order.
pub static BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "first_steps",
        name: "First Steps",
        description: "Create your first portrait",
        icon: "footsteps",
        xp_reward: 50,
        condition: |stats| stats.total_creations >= 1,
    },
    BadgeDefinition {
        id: "social_butterfly",
        name: "Social Butterfly",
        description: "Share 10 portraits",
        icon: "share-social",
        xp_reward: 100,
        condition: |stats| stats.total_shares >= 10,
    },
    BadgeDefinition {
        id: "artist",
        name: "Artist",
        description: "Create 50 portraits",
        icon: "brush",
        xp_reward: 200,
        condition: |stats| stats.total_creations >= 50,
    },
    BadgeDefinition {
        id: "historian",
        name: "Historian",
        description: "Try every historical era",
        icon: "library",
        xp_reward: 150,
        condition: |stats| stats.eras_used >= 5,
    },
    BadgeDefinition {
        id: "streak_master",
        name: "Streak Master",
        description: "Log in 7 days in a row",
        icon: "flame",
        xp_reward: 100,
        condition: |stats| stats.current_streak >= 7,
    },
];

/// Badges whose condition holds and which are not in `owned`, in table order.
///
/// Depends only on `stats` and `owned`, so the result is the same whatever
/// order earlier badges were awarded in.
pub fn evaluate_badges(stats: &UserStats, owned: &[String]) -> Vec<&'static BadgeDefinition> {
    BADGES
        .iter()
        .filter(|badge| !owned.iter().any(|id| id == badge.id))
        .filter(|badge| badge.is_met(stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(badges: &[&BadgeDefinition]) -> Vec<&'static str> {
        badges.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_badge_ids_unique() {
        for (i, badge) in BADGES.iter().enumerate() {
            assert!(
                BADGES[i + 1..].iter().all(|b| b.id != badge.id),
                "duplicate badge id {}",
                badge.id
            );
        }
    }

    #[test]
    fn test_first_creation_awards_first_steps() {
        let awarded = evaluate_badges(&UserStats::with_creations(1), &[]);
        assert_eq!(ids(&awarded), vec!["first_steps"]);
        assert_eq!(awarded[0].xp_reward, 50);
    }

    #[test]
    fn test_owned_badges_skipped() {
        let owned = vec!["first_steps".to_string()];
        assert!(evaluate_badges(&UserStats::with_creations(3), &owned).is_empty());
    }

    #[test]
    fn test_multiple_badges_in_table_order() {
        let stats = UserStats {
            total_creations: 60,
            total_shares: 12,
            eras_used: 5,
            current_streak: 7,
        };

        let awarded = evaluate_badges(&stats, &[]);
        assert_eq!(
            ids(&awarded),
            vec![
                "first_steps",
                "social_butterfly",
                "artist",
                "historian",
                "streak_master"
            ]
        );
    }

    #[test]
    fn test_thresholds_are_inclusive_lower_bounds() {
        let below = UserStats {
            total_creations: 0,
            total_shares: 9,
            eras_used: 4,
            current_streak: 6,
        };
        assert!(evaluate_badges(&below, &[]).is_empty());
    }
}
