/// Anti-cheat risk scoring heuristic
///
/// Strictly additive rule set over a gameplay behavior snapshot, capped to
/// [0, 100]. Display-only: scores sort and color the admin dashboard and
/// never trigger an automated action. The samples themselves are simulated
/// data; no live telemetry feeds this.
use serde::{Deserialize, Serialize};

/// Gameplay behavior snapshot for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorSample {
    /// Headshot percentage over recent matches (0-100)
    pub headshot_ratio: f64,
    pub kill_death_ratio: f64,
    /// Win percentage (0-100)
    pub win_rate: f64,
    pub reaction_time_ms: f64,
    /// Aim-consistency variance score; lower is more machine-like
    pub consistency_score: f64,
    pub report_count: i64,
}

/// Suspicion bands used for dashboard sorting/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            60..=84 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

/// Compute the 0-100 suspicion score for a behavior sample
///
/// Each signal is thresholded independently and the contributions summed.
/// Non-finite or negative inputs simply fail their comparisons and
/// contribute nothing, so the result is defined for arbitrary input.
pub fn risk_score(sample: &BehaviorSample) -> u8 {
    let mut score: u32 = 0;

    if sample.headshot_ratio > 80.0 {
        score += 30;
    } else if sample.headshot_ratio > 60.0 {
        score += 15;
    }

    if sample.kill_death_ratio > 10.0 {
        score += 25;
    } else if sample.kill_death_ratio > 5.0 {
        score += 10;
    }

    if sample.win_rate > 90.0 {
        score += 20;
    } else if sample.win_rate > 70.0 {
        score += 10;
    }

    if sample.reaction_time_ms < 50.0 {
        score += 25;
    }

    if sample.consistency_score < 30.0 {
        score += 15;
    }

    let report_points = sample.report_count.max(0).saturating_mul(2).min(20) as u32;
    score += report_points;

    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_sample() -> BehaviorSample {
        BehaviorSample {
            headshot_ratio: 25.0,
            kill_death_ratio: 1.2,
            win_rate: 40.0,
            reaction_time_ms: 230.0,
            consistency_score: 65.0,
            report_count: 0,
        }
    }

    #[test]
    fn test_clean_player_scores_zero() {
        assert_eq!(risk_score(&clean_sample()), 0);
    }

    #[test]
    fn test_individual_signals() {
        let mut sample = clean_sample();
        sample.headshot_ratio = 65.0;
        assert_eq!(risk_score(&sample), 15);
        sample.headshot_ratio = 81.0;
        assert_eq!(risk_score(&sample), 30);

        let mut sample = clean_sample();
        sample.kill_death_ratio = 6.0;
        assert_eq!(risk_score(&sample), 10);
        sample.kill_death_ratio = 11.0;
        assert_eq!(risk_score(&sample), 25);

        let mut sample = clean_sample();
        sample.win_rate = 75.0;
        assert_eq!(risk_score(&sample), 10);
        sample.win_rate = 95.0;
        assert_eq!(risk_score(&sample), 20);

        let mut sample = clean_sample();
        sample.reaction_time_ms = 40.0;
        assert_eq!(risk_score(&sample), 25);

        let mut sample = clean_sample();
        sample.consistency_score = 10.0;
        assert_eq!(risk_score(&sample), 15);
    }

    #[test]
    fn test_report_count_capped() {
        let mut sample = clean_sample();
        sample.report_count = 3;
        assert_eq!(risk_score(&sample), 6);
        sample.report_count = 10;
        assert_eq!(risk_score(&sample), 20);
        sample.report_count = 10_000;
        assert_eq!(risk_score(&sample), 20);
    }

    #[test]
    fn test_maximum_is_capped_at_100() {
        let sample = BehaviorSample {
            headshot_ratio: 99.0,
            kill_death_ratio: 50.0,
            win_rate: 99.0,
            reaction_time_ms: 10.0,
            consistency_score: 1.0,
            report_count: 100,
        };
        assert_eq!(risk_score(&sample), 100);
    }

    #[test]
    fn test_adversarial_inputs_stay_bounded() {
        let extremes = [
            BehaviorSample {
                headshot_ratio: -1e18,
                kill_death_ratio: -5.0,
                win_rate: -100.0,
                reaction_time_ms: f64::INFINITY,
                consistency_score: f64::NEG_INFINITY,
                report_count: i64::MIN,
            },
            BehaviorSample {
                headshot_ratio: f64::NAN,
                kill_death_ratio: f64::NAN,
                win_rate: f64::NAN,
                reaction_time_ms: f64::NAN,
                consistency_score: f64::NAN,
                report_count: i64::MAX,
            },
            BehaviorSample {
                headshot_ratio: f64::MAX,
                kill_death_ratio: f64::MAX,
                win_rate: f64::MAX,
                reaction_time_ms: f64::MIN,
                consistency_score: f64::MIN,
                report_count: i64::MAX,
            },
        ];

        for sample in &extremes {
            let score = risk_score(sample);
            assert!(score <= 100);
            // Deterministic: scoring twice gives the same result.
            assert_eq!(score, risk_score(sample));
        }
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::for_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::for_score(84), RiskLevel::High);
        assert_eq!(RiskLevel::for_score(85), RiskLevel::Critical);
        assert_eq!(RiskLevel::for_score(100), RiskLevel::Critical);
    }
}
