//! Job Scraper
//!
//! Runs one ingestion pass: walks today's listing, qualifies every job and
//! delivers the result to the sinks configured in the environment.

use anyhow::{Context, Result};
use job_scraper::fetchers::{HttpFetcher, DEFAULT_USER_AGENT};
use job_scraper::{Pipeline, PipelineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_scraper=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let config = PipelineConfig::from_env().context("Failed to load configuration")?;

    tracing::info!(
        listing_url = %config.listing.listing_url,
        pagination = ?config.listing.pagination,
        max_jobs = ?config.listing.max_jobs,
        concurrency = config.politeness.concurrency,
        sample_size = ?config.sample_size,
        "Starting job scraper"
    );

    let user_agent = config
        .politeness
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    let fetcher = HttpFetcher::with_user_agent(&user_agent).context("Failed to build HTTP client")?;

    let pipeline = Pipeline::new(fetcher, config)
        .with_configured_sinks()
        .context("Failed to set up sinks")?;

    if pipeline.sink_names().is_empty() {
        tracing::warn!(
            "No sinks configured; set API_BASE_URL or JOBS_SHEET_PATH to deliver records"
        );
    }

    let report = pipeline.run().await;

    tracing::info!(
        report = %serde_json::to_string(&report)?,
        "Job scraper finished"
    );

    if report.sink_failed > 0 {
        tracing::warn!(failed = report.sink_failed, "Some records were not delivered");
    }

    Ok(())
}
