use serde::{Deserialize, Serialize};

/// Business status value the API reports for an open, verified listing.
pub const OPERATIONAL: &str = "OPERATIONAL";

/// Request body for `places:searchText`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTextRequest {
    #[serde(rename = "textQuery")]
    pub text_query: String,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "pageToken", skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One page of text-search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

impl SearchTextResponse {
    /// Continuation token, treating an empty string as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A place as returned under the field mask requested by [`crate::PlacesClient`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    #[serde(rename = "displayName")]
    pub display_name: Option<LocalizedText>,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
    #[serde(rename = "businessStatus")]
    pub business_status: Option<String>,
    #[serde(rename = "nationalPhoneNumber")]
    pub national_phone_number: Option<String>,
    #[serde(rename = "websiteUri")]
    pub website_uri: Option<String>,
}

impl Place {
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|d| d.text.as_str())
    }

    pub fn is_operational(&self) -> bool {
        self.business_status.as_deref() == Some(OPERATIONAL)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    #[serde(rename = "languageCode")]
    pub language_code: Option<String>,
}
