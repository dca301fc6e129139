/// Game-stats update after a match result
///
/// Pure transform: counters are incremented, `win_rate` is recomputed from
/// the raw counters (never accumulated) and `rank` is re-derived from the
/// new experience total.
use serde::{Deserialize, Serialize};

use crate::constants::{EXPERIENCE_PER_LOSS, EXPERIENCE_PER_WIN};
use crate::profile::{GameStats, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
}

/// Apply one match result to a stats snapshot
pub fn apply_match_result(stats: &GameStats, result: MatchResult) -> GameStats {
    let games_played = stats.games_played.saturating_add(1);
    let (wins, losses, gained) = match result {
        MatchResult::Win => (stats.wins.saturating_add(1), stats.losses, EXPERIENCE_PER_WIN),
        MatchResult::Loss => (
            stats.wins,
            stats.losses.saturating_add(1),
            EXPERIENCE_PER_LOSS,
        ),
    };
    let experience = stats.experience.saturating_add(gained);

    GameStats {
        games_played,
        wins,
        losses,
        win_rate: win_rate(wins, games_played),
        rank: Rank::for_experience(experience),
        experience,
    }
}

/// Derived win rate in percent; zero when no games were played
pub fn win_rate(wins: u32, games_played: u32) -> f64 {
    if games_played == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(games_played) * 100.0
    }
}
