// Trait seams for the two upstream APIs.
//
// PlaceSearcher wraps the Places text search, SiteAuditor wraps PageSpeed.
// Both jobs only talk to these, so tests run against the mocks in `testing`
// with no network.

use anyhow::Result;
use async_trait::async_trait;

use outreach_common::AuditScores;
use pagespeed_client::PageSpeedClient;
use places_client::{PlacesClient, SearchTextResponse};

#[async_trait]
pub trait PlaceSearcher: Send + Sync {
    /// Fetch one page of results for `query`, continuing from `page_token`
    /// when given.
    async fn search_page(&self, query: &str, page_token: Option<&str>)
        -> Result<SearchTextResponse>;
}

#[async_trait]
pub trait SiteAuditor: Send + Sync {
    /// Audit a website and return its scores on a 0-100 scale.
    async fn audit(&self, url: &str) -> Result<AuditScores>;
}

#[async_trait]
impl PlaceSearcher for PlacesClient {
    async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<SearchTextResponse> {
        Ok(self.search_text(query, page_token).await?)
    }
}

#[async_trait]
impl SiteAuditor for PageSpeedClient {
    async fn audit(&self, url: &str) -> Result<AuditScores> {
        let fractions = self.category_scores(url).await?;
        Ok(AuditScores::from_fractions(
            fractions.performance,
            fractions.seo,
            fractions.best_practices,
        ))
    }
}
