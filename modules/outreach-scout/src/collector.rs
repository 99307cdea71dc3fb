use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use outreach_common::{BusinessRecord, Category, CategoryTable, NOT_AVAILABLE};
use places_client::Place;

use crate::pacing::Pacer;
use crate::traits::PlaceSearcher;

pub use outreach_common::config::DEFAULT_MAX_PER_INDUSTRY;

/// Pulls business listings for a city, one paginated text search per category.
///
/// Search failures are not caught here: a failed page aborts the run.
pub struct Collector {
    searcher: Arc<dyn PlaceSearcher>,
    pacer: Arc<dyn Pacer>,
    max_per_industry: usize,
}

impl Collector {
    pub fn new(searcher: Arc<dyn PlaceSearcher>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            searcher,
            pacer,
            max_per_industry: DEFAULT_MAX_PER_INDUSTRY,
        }
    }

    pub fn with_max_per_industry(mut self, max: usize) -> Self {
        self.max_per_industry = max;
        self
    }

    /// Collect records for every category in `categories`, in table order.
    pub async fn collect(
        &self,
        city: &str,
        categories: &CategoryTable,
    ) -> Result<Vec<BusinessRecord>> {
        let mut records = Vec::new();

        for category in categories.iter() {
            info!(industry = %category.label, city, "Fetching businesses");
            let found = self.collect_category(city, category).await?;
            info!(industry = %category.label, count = found.len(), "Category done");
            records.extend(found);
        }

        info!(city, total = records.len(), "Collection complete");
        Ok(records)
    }

    /// Page through one category until the cap is hit or the API stops
    /// returning a continuation token.
    pub async fn collect_category(
        &self,
        city: &str,
        category: &Category,
    ) -> Result<Vec<BusinessRecord>> {
        let query = category.query_for(city);
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_number = 0usize;

        while records.len() < self.max_per_industry {
            page_number += 1;
            let page = self
                .searcher
                .search_page(&query, page_token.as_deref())
                .await
                .with_context(|| {
                    format!("Search failed for '{query}' (page {page_number})")
                })?;

            let room = self.max_per_industry - records.len();
            records.extend(
                page.places
                    .iter()
                    .take(room)
                    .map(|place| normalize_place(place, &category.label, city)),
            );

            debug!(
                query = %query,
                page = page_number,
                returned = page.places.len(),
                collected = records.len(),
                "Page fetched"
            );

            match page.continuation() {
                Some(token) if records.len() < self.max_per_industry => {
                    page_token = Some(token.to_string());
                    self.pacer.pause().await;
                }
                _ => break,
            }
        }

        Ok(records)
    }
}

/// Map an API place into a flat record. Missing fields become `"N/A"`.
pub fn normalize_place(place: &Place, industry: &str, city: &str) -> BusinessRecord {
    BusinessRecord {
        name: or_na(place.name()),
        address: or_na(place.formatted_address.as_deref()),
        phone: or_na(place.national_phone_number.as_deref()),
        website: or_na(place.website_uri.as_deref()),
        is_claimed: place.is_operational(),
        industry: industry.to_string(),
        city: city.to_string(),
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use places_client::LocalizedText;

    #[test]
    fn full_place_maps_every_field() {
        let place = Place {
            display_name: Some(LocalizedText {
                text: "Hill Country Dental".into(),
                language_code: Some("en".into()),
            }),
            formatted_address: Some("200 Congress Ave, Austin, TX".into()),
            business_status: Some("OPERATIONAL".into()),
            national_phone_number: Some("(512) 555-0199".into()),
            website_uri: Some("https://hcdental.example".into()),
        };

        let record = normalize_place(&place, "dentist", "Austin");
        assert_eq!(record.name, "Hill Country Dental");
        assert_eq!(record.address, "200 Congress Ave, Austin, TX");
        assert_eq!(record.phone, "(512) 555-0199");
        assert_eq!(record.website, "https://hcdental.example");
        assert!(record.is_claimed);
        assert_eq!(record.industry, "dentist");
        assert_eq!(record.city, "Austin");
    }

    #[test]
    fn empty_place_defaults_to_placeholders() {
        let record = normalize_place(&Place::default(), "lawyer", "Austin");
        assert_eq!(record.name, NOT_AVAILABLE);
        assert_eq!(record.address, NOT_AVAILABLE);
        assert_eq!(record.phone, NOT_AVAILABLE);
        assert_eq!(record.website, NOT_AVAILABLE);
        assert!(!record.is_claimed);
    }

    #[test]
    fn non_operational_status_is_unclaimed() {
        let place = Place {
            business_status: Some("CLOSED_PERMANENTLY".into()),
            ..Place::default()
        };
        assert!(!normalize_place(&place, "surgeon", "Austin").is_claimed);
    }
}
