use crate::models::{AdSnapshot, AppData, DashboardStats, NewOffer, Offer, OfferSummary, Tag};
use crate::score::calculate_score;
use crate::stats::aggregate;
use crate::trend::calculate_trend;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfferError {
    #[error("offer not found: {0}")]
    NotFound(String),
    #[error("offer name must not be empty")]
    EmptyName,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Pinned,
    Favorites,
    Archived,
}

impl View {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "pinned" => Some(Self::Pinned),
            "favorites" | "favorite" => Some(Self::Favorites),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

pub fn normalize_date(raw: &str) -> Result<String, OfferError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| OfferError::InvalidDate(raw.to_string()))
}

impl AppData {
    pub fn create_offer(
        &mut self,
        new: NewOffer,
        now: DateTime<Utc>,
    ) -> Result<Offer, OfferError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(OfferError::EmptyName);
        }

        // Later entries for the same date win.
        let mut by_date = BTreeMap::new();
        for snapshot in new.ad_data {
            by_date.insert(normalize_date(&snapshot.date)?, snapshot.active_ads);
        }
        let ad_data = by_date
            .into_iter()
            .map(|(date, active_ads)| AdSnapshot { date, active_ads })
            .collect();

        let offer = Offer {
            id: self.allocate_id(),
            name: name.to_string(),
            description: new.description.trim().to_string(),
            ad_data,
            total_page_ads: new.total_page_ads,
            keywords: new
                .keywords
                .iter()
                .map(|keyword| keyword.trim())
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_string)
                .collect(),
            facebook_ad_library_url: new
                .facebook_ad_library_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            updated_at: now,
        };

        self.offers.push(offer.clone());
        Ok(offer)
    }

    pub fn record_snapshot(
        &mut self,
        id: &str,
        date: &str,
        active_ads: i64,
        now: DateTime<Utc>,
    ) -> Result<Offer, OfferError> {
        let date = normalize_date(date)?;
        let offer = self
            .offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or_else(|| OfferError::NotFound(id.to_string()))?;

        // Series loaded from disk are not guaranteed to be sorted.
        match offer.ad_data.iter().position(|snapshot| snapshot.date == date) {
            Some(index) => offer.ad_data[index].active_ads = active_ads,
            None => {
                let index = offer
                    .ad_data
                    .partition_point(|snapshot| snapshot.date.as_str() < date.as_str());
                offer.ad_data.insert(index, AdSnapshot { date, active_ads });
            }
        }
        offer.updated_at = now;

        Ok(offer.clone())
    }

    pub fn toggle(&mut self, id: &str, tag: Tag) -> Result<bool, OfferError> {
        self.offer(id)?;

        let set = match tag {
            Tag::Pinned => &mut self.pinned,
            Tag::Favorite => &mut self.favorites,
            Tag::Archived => &mut self.archived,
        };

        if set.remove(id) {
            Ok(false)
        } else {
            set.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn delete_offer(&mut self, id: &str) -> Result<Offer, OfferError> {
        let index = self
            .offers
            .iter()
            .position(|offer| offer.id == id)
            .ok_or_else(|| OfferError::NotFound(id.to_string()))?;

        self.pinned.remove(id);
        self.favorites.remove(id);
        self.archived.remove(id);
        Ok(self.offers.remove(index))
    }

    pub fn offer(&self, id: &str) -> Result<&Offer, OfferError> {
        self.offers
            .iter()
            .find(|offer| offer.id == id)
            .ok_or_else(|| OfferError::NotFound(id.to_string()))
    }

    pub fn summarize(&self, offer: &Offer) -> OfferSummary {
        OfferSummary {
            score: calculate_score(offer),
            trend: calculate_trend(offer),
            latest_ads: offer.latest_ads(),
            day_count: offer.ad_data.len(),
            is_pinned: self.pinned.contains(&offer.id),
            is_favorite: self.favorites.contains(&offer.id),
            is_archived: self.archived.contains(&offer.id),
            offer: offer.clone(),
        }
    }

    pub fn list(&self, view: View, search: Option<&str>) -> Vec<OfferSummary> {
        let needle = search
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        let mut rows: Vec<OfferSummary> = self
            .offers
            .iter()
            .filter(|offer| match view {
                View::All => !self.archived.contains(&offer.id),
                View::Pinned => self.pinned.contains(&offer.id),
                View::Favorites => self.favorites.contains(&offer.id),
                View::Archived => self.archived.contains(&offer.id),
            })
            .filter(|offer| needle.as_deref().is_none_or(|needle| matches_search(offer, needle)))
            .map(|offer| self.summarize(offer))
            .collect();

        rows.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.offer.updated_at.cmp(&a.offer.updated_at))
        });
        rows
    }

    pub fn stats(&self) -> DashboardStats {
        aggregate(&self.offers, &self.archived, &self.pinned, &self.favorites)
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("offer-{}", self.next_id);
            if !self.offers.iter().any(|offer| offer.id == id) {
                return id;
            }
        }
    }
}

fn matches_search(offer: &Offer, needle: &str) -> bool {
    offer.name.to_lowercase().contains(needle)
        || offer.description.to_lowercase().contains(needle)
        || offer
            .keywords
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(needle))
}
