use crate::models::{ChartPoint, DashboardStats, Offer, ScoreDistribution, ScoreResult, Trend};
use crate::score::calculate_score;
use crate::trend::direction_between;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

pub const CHART_DAYS: usize = 7;

/// Rolls non-archived offers up into dashboard totals, a score distribution
/// and a chart over the last [`CHART_DAYS`] dates that carry data.
pub fn aggregate(
    offers: &[Offer],
    archived: &BTreeSet<String>,
    pinned: &BTreeSet<String>,
    favorites: &BTreeSet<String>,
) -> DashboardStats {
    let active: Vec<&Offer> = offers
        .iter()
        .filter(|offer| !archived.contains(&offer.id))
        .collect();

    let mut total_active_ads = 0u64;
    let mut total_page_ads = 0u64;
    let mut yesterday_total = 0u64;
    let mut score_distribution = ScoreDistribution::default();

    for offer in &active {
        total_active_ads = total_active_ads.saturating_add(offer.latest_ads());
        total_page_ads = total_page_ads.saturating_add(offer.total_page_ads.unwrap_or(0));
        yesterday_total = yesterday_total.saturating_add(offer.previous_ads().unwrap_or(0));

        match calculate_score(offer).result {
            ScoreResult::High => score_distribution.high += 1,
            ScoreResult::Medium => score_distribution.medium += 1,
            ScoreResult::Low => score_distribution.low += 1,
        }
    }

    let chart = build_chart(&active);

    DashboardStats {
        total_offers: active.len(),
        total_active_ads,
        total_page_ads,
        trend: overall_trend(yesterday_total, total_active_ads),
        score_distribution,
        days_monitored: chart.len(),
        chart,
        pinned_count: pinned.len(),
        favorite_count: favorites.len(),
    }
}

// Unlike the per-offer trend, a zero baseline reports 0% here.
fn overall_trend(yesterday: u64, today: u64) -> Trend {
    let percentage = if yesterday == 0 {
        0.0
    } else {
        ((today as f64 - yesterday as f64) / yesterday as f64 * 100.0).abs()
    };

    Trend {
        direction: direction_between(yesterday, today),
        percentage,
    }
}

fn build_chart(active: &[&Offer]) -> Vec<ChartPoint> {
    let dates: BTreeSet<&str> = active
        .iter()
        .flat_map(|offer| offer.ad_data.iter().map(|snapshot| snapshot.date.as_str()))
        .collect();

    let skip = dates.len().saturating_sub(CHART_DAYS);
    dates
        .into_iter()
        .skip(skip)
        .map(|date| {
            let total_ads = active
                .iter()
                .filter_map(|offer| offer.ad_data.iter().find(|s| s.date == date))
                .fold(0u64, |sum, snapshot| sum.saturating_add(snapshot.ads()));

            ChartPoint {
                date: date.to_string(),
                label: chart_label(date),
                total_ads,
            }
        })
        .collect()
}

fn chart_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|parsed| parsed.format("%d/%m").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Memoized [`DashboardStats`] keyed by the revision of the data set.
#[derive(Debug, Default)]
pub struct StatsCache {
    entry: Option<(u64, DashboardStats)>,
}

impl StatsCache {
    pub fn get_or_compute<F>(&mut self, revision: u64, compute: F) -> &DashboardStats
    where
        F: FnOnce() -> DashboardStats,
    {
        if self.cached_revision() != Some(revision) {
            self.entry = None;
        }

        let entry = self.entry.get_or_insert_with(|| {
            debug!(revision, "recomputing dashboard stats");
            (revision, compute())
        });
        &entry.1
    }

    pub fn cached_revision(&self) -> Option<u64> {
        self.entry.as_ref().map(|(revision, _)| *revision)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdSnapshot, TrendDirection};
    use chrono::Utc;

    fn offer(id: &str, snapshots: &[(&str, i64)]) -> Offer {
        Offer {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            ad_data: snapshots
                .iter()
                .map(|&(date, active_ads)| AdSnapshot {
                    date: date.to_string(),
                    active_ads,
                })
                .collect(),
            total_page_ads: None,
            keywords: Vec::new(),
            facebook_ad_library_url: None,
            updated_at: Utc::now(),
        }
    }

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn empty_collection_yields_zeroed_stats() {
        let empty = BTreeSet::new();
        let stats = aggregate(&[], &empty, &empty, &empty);
        assert_eq!(stats, DashboardStats::default());
        assert!(stats.chart.is_empty());
        assert_eq!(stats.trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn archived_offers_are_excluded() {
        let offers = vec![
            offer("a", &[("2024-01-01", 4)]),
            offer("b", &[("2024-01-01", 6)]),
            offer("c", &[("2024-01-01", 100)]),
        ];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &ids(&["c"]), &empty, &empty);
        assert_eq!(stats.total_active_ads, 10);
        assert_eq!(stats.total_offers, 2);
        assert_eq!(stats.chart.len(), 1);
        assert_eq!(stats.chart[0].total_ads, 10);
    }

    #[test]
    fn page_ads_treat_missing_as_zero() {
        let mut with_page = offer("a", &[("2024-01-01", 1)]);
        with_page.total_page_ads = Some(42);
        let offers = vec![with_page, offer("b", &[("2024-01-01", 1)])];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &empty, &empty, &empty);
        assert_eq!(stats.total_page_ads, 42);
    }

    #[test]
    fn overall_trend_compares_latest_with_previous_totals() {
        let offers = vec![
            offer("a", &[("2024-01-01", 10), ("2024-01-02", 5)]),
            offer("b", &[("2024-01-01", 10), ("2024-01-02", 10)]),
            offer("c", &[("2024-01-02", 3)]),
        ];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &empty, &empty, &empty);
        assert_eq!(stats.total_active_ads, 18);
        assert_eq!(stats.trend.direction, TrendDirection::Down);
        assert_eq!(stats.trend.percentage, 10.0);
    }

    #[test]
    fn overall_trend_with_zero_baseline_reports_zero_percent() {
        let offers = vec![offer("a", &[("2024-01-01", 5)])];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &empty, &empty, &empty);
        assert_eq!(stats.trend.direction, TrendDirection::Up);
        assert_eq!(stats.trend.percentage, 0.0);
    }

    #[test]
    fn chart_keeps_last_seven_distinct_dates() {
        let days: Vec<String> = (1..=10).map(|day| format!("2024-01-{day:02}")).collect();
        let first: Vec<(&str, i64)> = days[0..6].iter().map(|d| (d.as_str(), 1)).collect();
        let second: Vec<(&str, i64)> = days[3..10].iter().map(|d| (d.as_str(), 2)).collect();

        let offers = vec![
            offer("a", &first),
            offer("b", &second),
            offer("archived", &[("2024-02-01", 99)]),
        ];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &ids(&["archived"]), &empty, &empty);

        assert_eq!(stats.days_monitored, CHART_DAYS);
        let dates: Vec<&str> = stats.chart.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-01-04",
                "2024-01-05",
                "2024-01-06",
                "2024-01-07",
                "2024-01-08",
                "2024-01-09",
                "2024-01-10",
            ]
        );
        assert_eq!(stats.chart[0].total_ads, 3);
        assert_eq!(stats.chart[3].total_ads, 2);
        assert_eq!(stats.chart[0].label, "04/01");
    }

    #[test]
    fn tag_counts_ignore_archiving() {
        let offers = vec![offer("a", &[]), offer("b", &[])];
        let stats = aggregate(&offers, &ids(&["a"]), &ids(&["a", "b"]), &ids(&["a"]));
        assert_eq!(stats.pinned_count, 2);
        assert_eq!(stats.favorite_count, 1);
        assert_eq!(stats.total_offers, 1);
    }

    #[test]
    fn distribution_counts_every_active_offer() {
        let offers = vec![
            offer("high", &[("2024-01-01", 60)]),
            offer("low", &[("2024-01-01", 1)]),
            offer("empty", &[]),
        ];
        let empty = BTreeSet::new();
        let stats = aggregate(&offers, &empty, &empty, &empty);
        assert_eq!(stats.score_distribution.high, 1);
        assert_eq!(stats.score_distribution.low, 2);
        assert_eq!(stats.score_distribution.medium, 0);
    }

    #[test]
    fn cache_recomputes_only_on_new_revision() {
        let mut cache = StatsCache::default();
        let mut calls = 0;

        cache.get_or_compute(1, || {
            calls += 1;
            DashboardStats::default()
        });
        cache.get_or_compute(1, || {
            calls += 1;
            DashboardStats::default()
        });
        assert_eq!(calls, 1);

        cache.get_or_compute(2, || {
            calls += 1;
            DashboardStats::default()
        });
        assert_eq!(calls, 2);
        assert_eq!(cache.cached_revision(), Some(2));

        cache.invalidate();
        assert_eq!(cache.cached_revision(), None);
    }
}
