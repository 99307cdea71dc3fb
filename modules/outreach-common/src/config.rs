use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::OutreachError;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAX_PER_INDUSTRY: usize = 180;
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";
pub const DEFAULT_PAGESPEED_BASE_URL: &str = "https://www.googleapis.com";

/// The Places API refuses a continuation token that is used too soon after it
/// was issued, so pages are never requested faster than this.
pub const MIN_PAGE_DELAY_SECS: u64 = 2;
/// PageSpeed quota floor between audit calls.
pub const MIN_AUDIT_DELAY_SECS: u64 = 3;

/// Configuration for the Collector job.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub data_dir: PathBuf,
    pub max_per_industry: usize,
    pub page_delay: Duration,
}

/// Configuration for the Auditor job.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    pub pagespeed_api_key: String,
    pub pagespeed_base_url: String,
    pub data_dir: PathBuf,
    pub audit_delay: Duration,
}

impl CollectorConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, OutreachError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary key lookup. Fails before any request is made
    /// when the API key is missing or a value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OutreachError> {
        Ok(Self {
            places_api_key: required(&lookup, "GOOGLE_PLACES_API_KEY")?,
            places_base_url: lookup("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            data_dir: data_dir(&lookup),
            max_per_industry: parsed(&lookup, "OUTREACH_MAX_PER_INDUSTRY")?
                .unwrap_or(DEFAULT_MAX_PER_INDUSTRY),
            page_delay: delay(&lookup, "OUTREACH_PAGE_DELAY_SECS", MIN_PAGE_DELAY_SECS)?,
        })
    }

    pub fn log_redacted(&self) {
        info!(
            places_api_key = %redact(&self.places_api_key),
            places_base_url = %self.places_base_url,
            data_dir = %self.data_dir.display(),
            max_per_industry = self.max_per_industry,
            page_delay_secs = self.page_delay.as_secs(),
            "Collector config"
        );
    }
}

impl AuditorConfig {
    pub fn from_env() -> Result<Self, OutreachError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OutreachError> {
        Ok(Self {
            pagespeed_api_key: required(&lookup, "PAGESPEED_API_KEY")?,
            pagespeed_base_url: lookup("PAGESPEED_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PAGESPEED_BASE_URL.to_string()),
            data_dir: data_dir(&lookup),
            audit_delay: delay(&lookup, "OUTREACH_AUDIT_DELAY_SECS", MIN_AUDIT_DELAY_SECS)?,
        })
    }

    pub fn log_redacted(&self) {
        info!(
            pagespeed_api_key = %redact(&self.pagespeed_api_key),
            pagespeed_base_url = %self.pagespeed_base_url,
            data_dir = %self.data_dir.display(),
            audit_delay_secs = self.audit_delay.as_secs(),
            "Auditor config"
        );
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, OutreachError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(OutreachError::MissingCredential(key)),
    }
}

fn data_dir(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("OUTREACH_DATA_DIR")
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, OutreachError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OutreachError::Config(format!("{key} must be a number, got '{raw}'"))),
    }
}

fn delay(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    min_secs: u64,
) -> Result<Duration, OutreachError> {
    let secs: u64 = parsed(lookup, key)?.unwrap_or(min_secs);
    if secs < min_secs {
        return Err(OutreachError::Config(format!(
            "{key} must be at least {min_secs} seconds, got {secs}"
        )));
    }
    Ok(Duration::from_secs(secs))
}

fn redact(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}
