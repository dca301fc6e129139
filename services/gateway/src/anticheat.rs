//! Anti-cheat dashboard data
//!
//! The behavior samples are simulated: no live telemetry pipeline exists,
//! so the dashboard scores a fixed roster. Scores sort and color the
//! operator view and never drive an automated action.

use serde::Serialize;

use shared::risk::{risk_score, BehaviorSample, RiskLevel};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerBehaviorReport {
    pub player: String,
    pub sample: BehaviorSample,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

fn roster() -> Vec<(&'static str, BehaviorSample)> {
    vec![
        (
            "shadow_strike",
            BehaviorSample {
                headshot_ratio: 92.0,
                kill_death_ratio: 14.2,
                win_rate: 96.0,
                reaction_time_ms: 38.0,
                consistency_score: 12.0,
                report_count: 23,
            },
        ),
        (
            "night_hawk",
            BehaviorSample {
                headshot_ratio: 71.0,
                kill_death_ratio: 6.4,
                win_rate: 74.0,
                reaction_time_ms: 142.0,
                consistency_score: 48.0,
                report_count: 4,
            },
        ),
        (
            "pixel_queen",
            BehaviorSample {
                headshot_ratio: 44.0,
                kill_death_ratio: 2.1,
                win_rate: 52.0,
                reaction_time_ms: 215.0,
                consistency_score: 61.0,
                report_count: 0,
            },
        ),
        (
            "zero_cool",
            BehaviorSample {
                headshot_ratio: 83.5,
                kill_death_ratio: 11.0,
                win_rate: 88.0,
                reaction_time_ms: 47.0,
                consistency_score: 22.0,
                report_count: 9,
            },
        ),
        (
            "mellow_fox",
            BehaviorSample {
                headshot_ratio: 31.0,
                kill_death_ratio: 0.9,
                win_rate: 38.0,
                reaction_time_ms: 260.0,
                consistency_score: 72.0,
                report_count: 1,
            },
        ),
        (
            "turbo_lag",
            BehaviorSample {
                headshot_ratio: 62.5,
                kill_death_ratio: 5.2,
                win_rate: 71.0,
                reaction_time_ms: 120.0,
                consistency_score: 35.0,
                report_count: 6,
            },
        ),
    ]
}

/// The scored roster, highest suspicion first
pub fn risk_reports() -> Vec<PlayerBehaviorReport> {
    let mut reports: Vec<PlayerBehaviorReport> = roster()
        .into_iter()
        .map(|(player, sample)| {
            let score = risk_score(&sample);
            PlayerBehaviorReport {
                player: player.to_string(),
                risk_score: score,
                risk_level: RiskLevel::for_score(score),
                sample,
            }
        })
        .collect();

    reports.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    reports
}
