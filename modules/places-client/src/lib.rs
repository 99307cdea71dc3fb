pub mod error;
pub mod types;

pub use error::{PlacesError, Result};
pub use types::{LocalizedText, Place, SearchTextRequest, SearchTextResponse, OPERATIONAL};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

/// Fields requested from `places:searchText`. `nextPageToken` must be listed
/// or the API never returns a continuation token.
const FIELD_MASK: &str = "places.displayName,places.formattedAddress,places.businessStatus,places.nationalPhoneNumber,places.websiteUri,nextPageToken";

/// Results per page. The API caps this at 20.
pub const PAGE_SIZE: u32 = 20;

pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Point the client at a different host (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page of text-search results. Pass the previous page's
    /// `next_page_token` to continue a search.
    pub async fn search_text(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<SearchTextResponse> {
        let body = SearchTextRequest {
            text_query: query.to_string(),
            page_size: PAGE_SIZE,
            page_token: page_token.map(String::from),
        };

        let url = format!("{}/v1/places:searchText", self.base_url);
        tracing::debug!(query, has_token = page_token.is_some(), "places:searchText");

        let resp = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let page: SearchTextResponse = serde_json::from_str(&text)?;
        Ok(page)
    }
}
