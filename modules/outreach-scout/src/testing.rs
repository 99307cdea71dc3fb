// Test mocks for the outreach jobs.
//
// - MockSearcher (PlaceSearcher): scripted pages per query, tokens chained
//   automatically, call log for pagination assertions
// - MockAuditor (SiteAuditor): url -> scores, anything else fails
// - RecordingPacer (Pacer): counts pauses instead of sleeping
//
// Plus builders for places and tables.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use outreach_common::{AuditScores, BusinessRecord};
use places_client::{LocalizedText, Place, SearchTextResponse, OPERATIONAL};

use crate::pacing::Pacer;
use crate::table::OutreachTable;
use crate::traits::{PlaceSearcher, SiteAuditor};

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

/// A recorded `search_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub page_token: Option<String>,
}

/// Serves pre-scripted result pages. Page `n` of a query carries a token that
/// leads to page `n + 1`; the last page carries none.
pub struct MockSearcher {
    pages: HashMap<String, Vec<Vec<Place>>>,
    fallback: Option<Vec<Vec<Place>>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fallback: None,
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_query(mut self, query: &str, pages: Vec<Vec<Place>>) -> Self {
        self.pages.insert(query.to_string(), pages);
        self
    }

    /// Pages served for any query without its own script.
    pub fn on_any_query(mut self, pages: Vec<Vec<Place>>) -> Self {
        self.fallback = Some(pages);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, query: &str) -> Vec<SearchCall> {
        self.calls().into_iter().filter(|c| c.query == query).collect()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

fn page_token(query: &str, index: usize) -> String {
    format!("{query}#{index}")
}

#[async_trait]
impl PlaceSearcher for MockSearcher {
    async fn search_page(
        &self,
        query: &str,
        page_token_in: Option<&str>,
    ) -> Result<SearchTextResponse> {
        self.calls.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            page_token: page_token_in.map(String::from),
        });

        if self.failing.contains(query) {
            bail!("search quota exceeded for '{query}'");
        }

        let pages = self
            .pages
            .get(query)
            .or(self.fallback.as_ref())
            .ok_or_else(|| anyhow!("no pages scripted for '{query}'"))?;

        let index = match page_token_in {
            None => 0,
            Some(token) => (1..pages.len())
                .find(|i| page_token(query, *i) == token)
                .ok_or_else(|| anyhow!("unknown page token '{token}'"))?,
        };

        let places = pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < pages.len()).then(|| page_token(query, index + 1));
        Ok(SearchTextResponse {
            places,
            next_page_token,
        })
    }
}

// ---------------------------------------------------------------------------
// MockAuditor
// ---------------------------------------------------------------------------

/// Returns registered scores per URL; unregistered or failing URLs error.
pub struct MockAuditor {
    scores: HashMap<String, AuditScores>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockAuditor {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_url(mut self, url: &str, scores: AuditScores) -> Self {
        self.scores.insert(url.to_string(), scores);
        self
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAuditor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SiteAuditor for MockAuditor {
    async fn audit(&self, url: &str) -> Result<AuditScores> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            bail!("lighthouse timed out for {url}");
        }
        self.scores
            .get(url)
            .copied()
            .ok_or_else(|| anyhow!("no scores registered for {url}"))
    }
}

// ---------------------------------------------------------------------------
// RecordingPacer
// ---------------------------------------------------------------------------

/// Counts pauses and returns immediately.
#[derive(Default)]
pub struct RecordingPacer {
    pauses: AtomicUsize,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// An operational place with every field populated.
pub fn place(name: &str, website: &str) -> Place {
    Place {
        display_name: Some(LocalizedText {
            text: name.to_string(),
            language_code: Some("en".to_string()),
        }),
        formatted_address: Some(format!("{name} HQ, Austin, TX")),
        business_status: Some(OPERATIONAL.to_string()),
        national_phone_number: Some("(512) 555-0100".to_string()),
        website_uri: Some(website.to_string()),
    }
}

/// `count` places named `<prefix>-<n>`.
pub fn places(prefix: &str, count: usize) -> Vec<Place> {
    (0..count)
        .map(|n| place(&format!("{prefix}-{n}"), &format!("https://{prefix}-{n}.example")))
        .collect()
}

pub fn scores(performance: f64, seo: f64, best_practices: f64) -> AuditScores {
    AuditScores {
        performance,
        seo,
        best_practices,
    }
}

/// A collector-shaped table with one row per website.
pub fn table_with_websites(websites: &[&str]) -> OutreachTable {
    let records: Vec<BusinessRecord> = websites
        .iter()
        .enumerate()
        .map(|(i, website)| BusinessRecord {
            name: format!("Business {i}"),
            address: "N/A".to_string(),
            phone: "N/A".to_string(),
            website: website.to_string(),
            is_claimed: true,
            industry: "lawyer".to_string(),
            city: "Austin".to_string(),
        })
        .collect();
    OutreachTable::from_records(&records)
}
