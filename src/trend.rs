use crate::models::{Offer, Trend, TrendDirection};

/// Percentage reported when activity starts from a zero baseline.
pub const NEW_ACTIVITY_PERCENTAGE: f64 = 100.0;

/// Day-over-day trend between the two most recent snapshots.
pub fn calculate_trend(offer: &Offer) -> Trend {
    match offer.previous_ads() {
        Some(previous) => compare(previous, offer.latest_ads()),
        None => Trend::stable(),
    }
}

/// Signed percent change from `previous` to `current`, always finite.
pub fn compare(previous: u64, current: u64) -> Trend {
    let direction = direction_between(previous, current);
    let percentage = if previous == 0 {
        if current == 0 { 0.0 } else { NEW_ACTIVITY_PERCENTAGE }
    } else {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    };

    Trend {
        direction,
        percentage,
    }
}

pub fn direction_between(previous: u64, current: u64) -> TrendDirection {
    if current > previous {
        TrendDirection::Up
    } else if current < previous {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}
