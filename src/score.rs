use crate::models::{Offer, Score, ScoreResult};

/// Scores at or above this value are `high`.
pub const HIGH_SCORE_THRESHOLD: u8 = 70;
/// Scores at or above this value (and below high) are `medium`.
pub const MEDIUM_SCORE_THRESHOLD: u8 = 40;
/// Number of most recent snapshots considered for sustained activity.
pub const SCORE_WINDOW_DAYS: usize = 7;
/// Ad count at which an activity component reaches its full weight.
pub const ACTIVITY_SATURATION: f64 = 50.0;

const LATEST_WEIGHT: f64 = 60.0;
const SUSTAINED_WEIGHT: f64 = 25.0;
const HISTORY_WEIGHT: f64 = 15.0;

/// Derives a 0-100 score from an offer's recent ad activity.
///
/// The value blends the latest count, the mean over the last
/// [`SCORE_WINDOW_DAYS`] snapshots and how much of that window has history.
/// More activity never lowers the value.
pub fn calculate_score(offer: &Offer) -> Score {
    if offer.ad_data.is_empty() {
        return score_from_value(0);
    }

    let start = offer.ad_data.len().saturating_sub(SCORE_WINDOW_DAYS);
    let window = &offer.ad_data[start..];

    let latest = offer.latest_ads() as f64;
    let recent_avg = window.iter().map(|s| s.ads() as f64).sum::<f64>() / window.len() as f64;
    let history = window.len() as f64 / SCORE_WINDOW_DAYS as f64;

    let raw = LATEST_WEIGHT * saturate(latest)
        + SUSTAINED_WEIGHT * saturate(recent_avg)
        + HISTORY_WEIGHT * history;

    score_from_value(raw.round().clamp(0.0, 100.0) as u8)
}

pub fn score_from_value(value: u8) -> Score {
    let value = value.min(100);
    let result = if value >= HIGH_SCORE_THRESHOLD {
        ScoreResult::High
    } else if value >= MEDIUM_SCORE_THRESHOLD {
        ScoreResult::Medium
    } else {
        ScoreResult::Low
    };
    Score { value, result }
}

fn saturate(count: f64) -> f64 {
    (count / ACTIVITY_SATURATION).min(1.0)
}
