pub mod error;
pub mod types;

pub use error::{PageSpeedError, Result};
pub use types::{
    Categories, Category, CategoryScores, LighthouseResult, PagespeedResponse, BEST_PRACTICES,
    PERFORMANCE, SEO,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

pub struct PageSpeedClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PageSpeedClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Run a Lighthouse audit for `url` restricted to performance, SEO and
    /// best-practices.
    pub async fn run_pagespeed(&self, url: &str) -> Result<PagespeedResponse> {
        let endpoint = format!("{}/pagespeedonline/v5/runPagespeed", self.base_url);
        let query = [
            ("url", url),
            ("key", self.api_key.as_str()),
            ("category", PERFORMANCE),
            ("category", SEO),
            ("category", BEST_PRACTICES),
        ];

        let resp = self.client.get(&endpoint).query(&query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PageSpeedError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Audit `url` and return its three category scores as `[0,1]` fractions.
    pub async fn category_scores(&self, url: &str) -> Result<CategoryScores> {
        let report = self.run_pagespeed(url).await?;
        let scores = report.category_scores()?;
        tracing::debug!(
            url,
            performance = scores.performance,
            seo = scores.seo,
            best_practices = scores.best_practices,
            "Lighthouse scores"
        );
        Ok(scores)
    }
}
