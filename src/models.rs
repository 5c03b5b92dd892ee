use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSnapshot {
    pub date: String,
    pub active_ads: i64,
}

impl AdSnapshot {
    pub fn ads(&self) -> u64 {
        self.active_ads.max(0) as u64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ad_data: Vec<AdSnapshot>,
    #[serde(default)]
    pub total_page_ads: Option<u64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub facebook_ad_library_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    pub fn latest_ads(&self) -> u64 {
        self.ad_data.last().map(AdSnapshot::ads).unwrap_or(0)
    }

    pub fn previous_ads(&self) -> Option<u64> {
        match self.ad_data.as_slice() {
            [.., previous, _] => Some(previous.ads()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub pinned: BTreeSet<String>,
    #[serde(default)]
    pub favorites: BTreeSet<String>,
    #[serde(default)]
    pub archived: BTreeSet<String>,
    #[serde(default)]
    pub next_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoreResult {
    High,
    Medium,
    #[default]
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Score {
    pub value: u8,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Trend {
    pub direction: TrendDirection,
    pub percentage: f64,
}

impl Trend {
    pub fn stable() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Pinned,
    Favorite,
    Archived,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferSummary {
    #[serde(flatten)]
    pub offer: Offer,
    pub score: Score,
    pub trend: Trend,
    pub latest_ads: u64,
    pub day_count: usize,
    pub is_pinned: bool,
    pub is_favorite: bool,
    pub is_archived: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoreDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub label: String,
    pub total_ads: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub total_offers: usize,
    pub total_active_ads: u64,
    pub total_page_ads: u64,
    pub trend: Trend,
    pub score_distribution: ScoreDistribution,
    pub chart: Vec<ChartPoint>,
    pub days_monitored: usize,
    pub pinned_count: usize,
    pub favorite_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct NewOffer {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub total_page_ads: Option<u64>,
    #[serde(default)]
    pub facebook_ad_library_url: Option<String>,
    #[serde(default)]
    pub ad_data: Vec<AdSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub date: Option<String>,
    pub active_ads: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub view: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub tag: Tag,
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}
