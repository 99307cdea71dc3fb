//! Collect business listings for a city into `outreach_<date>.csv`.
//!
//! Usage: outreach-collect "Austin" "plumber, electrician"

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use outreach_common::{CategoryTable, CollectorConfig, OutreachError};
use outreach_scout::{table, Collector, FixedDelay};
use places_client::PlacesClient;

#[derive(Parser)]
#[command(name = "outreach-collect", about = "Collect business listings into a dated outreach table")]
struct Cli {
    /// City to search in
    city: String,

    /// Comma-separated business types (defaults to the built-in professional services)
    #[arg(value_delimiter = ',')]
    business_types: Option<Vec<String>>,

    /// Override OUTREACH_MAX_PER_INDUSTRY
    #[arg(long)]
    max_per_industry: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.city.trim().is_empty() {
        return Err(OutreachError::Validation("city must not be empty".into()).into());
    }

    let config = CollectorConfig::from_env()?;
    config.log_redacted();

    let categories = CategoryTable::from_labels_or_default(cli.business_types.as_deref());
    let max_per_industry = cli.max_per_industry.unwrap_or(config.max_per_industry);

    let client = PlacesClient::new(config.places_api_key.clone())
        .with_base_url(&config.places_base_url);
    let collector = Collector::new(Arc::new(client), Arc::new(FixedDelay::new(config.page_delay)))
        .with_max_per_industry(max_per_industry);

    info!(city = %cli.city, categories = categories.len(), "Fetching business data");
    let records = collector.collect(&cli.city, &categories).await?;

    let today = chrono::Local::now().date_naive();
    let path = table::write_records(&config.data_dir, today, &records)?;
    info!(path = %path.display(), records = records.len(), "Outreach list saved");

    Ok(())
}
