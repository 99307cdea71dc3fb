//! Attach Lighthouse scores to the most recent outreach table, in place.
//!
//! Usage: outreach-audit

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use outreach_common::AuditorConfig;
use outreach_scout::{table, Auditor, FixedDelay};
use pagespeed_client::PageSpeedClient;

#[derive(Parser)]
#[command(
    name = "outreach-audit",
    about = "Score every website in the latest outreach table with PageSpeed Insights"
)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _cli = Cli::parse();

    let config = AuditorConfig::from_env()?;
    config.log_redacted();

    let Some(path) = table::latest_table(&config.data_dir)? else {
        warn!(data_dir = %config.data_dir.display(), "No valid outreach table found, nothing to audit");
        return Ok(());
    };

    let client = PageSpeedClient::new(config.pagespeed_api_key.clone())
        .with_base_url(&config.pagespeed_base_url);
    let auditor = Auditor::new(Arc::new(client), Arc::new(FixedDelay::new(config.audit_delay)));

    let summary = auditor.audit_file(&path).await?;
    info!(path = %path.display(), %summary, "Lighthouse audit results appended");

    Ok(())
}
