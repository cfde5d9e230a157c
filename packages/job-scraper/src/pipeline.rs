//! End-to-end run: listing, extraction, normalization, filtering,
//! sampling and delivery.
//!
//! Each job is processed on its own. A detail page that fails to fetch is
//! counted and skipped; nothing short of an empty listing ends a run early.
//!
//! # Example
//!
//! ```rust,ignore
//! use job_scraper::{HttpFetcher, Pipeline, PipelineConfig, SpreadsheetSink, SheetMode};
//!
//! let config = PipelineConfig::from_env()?;
//! let report = Pipeline::new(HttpFetcher::new()?, config)
//!     .with_sink(SpreadsheetSink::new("jobs.csv", SheetMode::Replace))
//!     .run()
//!     .await;
//! println!("{} qualified", report.qualified);
//! ```

use futures::{stream, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::extract::DetailExtractor;
use crate::fetchers::PoliteFetcher;
use crate::filter::{FilterDecision, FilterEngine};
use crate::listing::ListingWalker;
use crate::normalize::normalize;
use crate::sampler::Sampler;
use crate::sinks::{ApiSink, SpreadsheetSink};
use crate::traits::{
    fetcher::PageFetcher,
    sink::{JobSink, SinkReport},
};
use crate::types::job::{JobDetail, JobRecord, JobSummary};

/// Counts from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Summaries produced by the listing walk
    pub listed: usize,
    /// Detail pages that could not be fetched
    pub fetch_failed: usize,
    pub extracted: usize,
    pub qualified: usize,
    pub rejected: usize,
    /// Rejections per filter rule
    pub rejected_by_rule: BTreeMap<String, usize>,
    /// Records handed to the sinks after sampling
    pub sampled: usize,
    pub sink_succeeded: usize,
    pub sink_failed: usize,
}

/// What happened to one listed job.
#[derive(Debug)]
enum JobOutcome {
    FetchFailed,
    Qualified(Box<JobRecord>),
    Rejected(FilterDecision),
}

/// Orchestrates a whole run over one fetcher and a set of sinks.
pub struct Pipeline<F: PageFetcher> {
    fetcher: Arc<F>,
    config: PipelineConfig,
    extractor: DetailExtractor,
    filter: FilterEngine,
    sinks: Vec<Box<dyn JobSink>>,
    seed: Option<u64>,
}

impl<F: PageFetcher> Pipeline<F> {
    pub fn new(fetcher: F, config: PipelineConfig) -> Self {
        let filter = FilterEngine::new(config.filter.clone());
        Self {
            fetcher: Arc::new(fetcher),
            config,
            extractor: DetailExtractor::new(),
            filter,
            sinks: Vec::new(),
            seed: None,
        }
    }

    /// Deliver the final records to `sink` as well.
    pub fn with_sink(mut self, sink: impl JobSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add the sinks named in the config's [`SinkConfig`](crate::config::SinkConfig).
    pub fn with_configured_sinks(mut self) -> Result<Self, PipelineError> {
        let sinks = self.config.sinks.clone();
        if let Some(base_url) = &sinks.api_base_url {
            self.sinks.push(Box::new(ApiSink::new(base_url)?));
        }
        if let Some(path) = &sinks.sheet_path {
            self.sinks.push(Box::new(SpreadsheetSink::new(path, sinks.sheet_mode)));
        }
        Ok(self)
    }

    /// Names of the attached sinks, in delivery order.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }

    /// Seed the sampler so the chosen subset is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run once and report what happened.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        let walker = ListingWalker::new(Arc::clone(&self.fetcher), self.config.listing.clone())
            .with_page_delay(self.config.politeness.page_delay);
        let summaries = walker.collect_all().await;
        report.listed = summaries.len();

        if summaries.is_empty() {
            warn!(
                url = %self.config.listing.listing_url,
                stage = "listing",
                "No listings found, nothing to process"
            );
            return report;
        }
        info!(stage = "listing", count = summaries.len(), "Listing walk complete");

        let qualified = self.qualify(summaries, &mut report).await;
        let records = self.sample(qualified);
        report.sampled = records.len();

        let delivered = self.deliver(&records).await;
        report.sink_succeeded = delivered.succeeded;
        report.sink_failed = delivered.failed;

        info!(
            listed = report.listed,
            fetch_failed = report.fetch_failed,
            qualified = report.qualified,
            rejected = report.rejected,
            sampled = report.sampled,
            sink_succeeded = report.sink_succeeded,
            sink_failed = report.sink_failed,
            "Run complete"
        );
        report
    }

    /// Fetch, extract, normalize and filter every summary.
    ///
    /// Up to `concurrency` jobs are in flight at once; detail fetches to one
    /// host stay spaced by the detail delay. Qualified records come back in
    /// listing order whatever order they finished in.
    async fn qualify(&self, summaries: Vec<JobSummary>, report: &mut RunReport) -> Vec<JobRecord> {
        let detail_fetcher = PoliteFetcher::new(
            Arc::clone(&self.fetcher),
            self.config.politeness.detail_delay,
        );
        let detail_fetcher = &detail_fetcher;
        let concurrency = self.config.politeness.concurrency.max(1);

        let mut outcomes: Vec<(usize, JobOutcome)> = stream::iter(summaries.into_iter().enumerate())
            .map(|(index, summary)| async move {
                (index, self.process(detail_fetcher, &summary).await)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut qualified = Vec::new();
        for (_, outcome) in outcomes {
            match outcome {
                JobOutcome::FetchFailed => report.fetch_failed += 1,
                JobOutcome::Qualified(record) => {
                    report.extracted += 1;
                    report.qualified += 1;
                    qualified.push(*record);
                }
                JobOutcome::Rejected(decision) => {
                    report.extracted += 1;
                    report.rejected += 1;
                    if let Some(rule) = decision.rule {
                        *report.rejected_by_rule.entry(rule.as_str().to_string()).or_insert(0) += 1;
                    }
                }
            }
        }
        qualified
    }

    /// One job, start to decision.
    async fn process<D: PageFetcher>(&self, fetcher: &D, summary: &JobSummary) -> JobOutcome {
        let page = match fetcher.fetch(&summary.link).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!(
                    url = %summary.link,
                    stage = "fetch",
                    status = page.status_code,
                    "Detail page unavailable"
                );
                return JobOutcome::FetchFailed;
            }
            Err(e) => {
                warn!(url = %summary.link, stage = "fetch", error = %e, "Detail page unavailable");
                return JobOutcome::FetchFailed;
            }
        };

        let detail = with_summary_fallbacks(self.extractor.extract(&page), summary);
        let record = normalize(&detail);
        let decision = self.filter.evaluate(&record);

        if decision.passed {
            JobOutcome::Qualified(Box::new(record))
        } else {
            JobOutcome::Rejected(decision)
        }
    }

    fn sample(&self, qualified: Vec<JobRecord>) -> Vec<JobRecord> {
        match self.config.sample_size {
            Some(k) => {
                let sampler = match self.seed {
                    Some(seed) => Sampler::seeded(k, seed),
                    None => Sampler::new(k),
                };
                sampler.sample(qualified)
            }
            None => qualified,
        }
    }

    /// Hand the final records to every sink, even when there are none, so a
    /// replace-mode worksheet never keeps an earlier run's rows.
    async fn deliver(&self, records: &[JobRecord]) -> SinkReport {
        let mut total = SinkReport::default();
        if records.is_empty() {
            debug!(
                stage = "sink",
                sinks = self.sinks.len(),
                "No records qualified, sinks still run"
            );
        }

        for sink in &self.sinks {
            let report = sink.push(records).await;
            info!(
                stage = "sink",
                sink = sink.name(),
                succeeded = report.succeeded,
                failed = report.failed,
                "Sink finished"
            );
            total.merge(report);
        }
        total
    }
}

/// Fill gaps in a detail from its listing entry.
///
/// The listing carries title, company and location too; they are used only
/// when the detail page did not yield its own.
fn with_summary_fallbacks(mut detail: JobDetail, summary: &JobSummary) -> JobDetail {
    if detail.title.is_none() {
        detail.title = Some(summary.title.clone());
    }
    if detail.company.is_none() {
        detail.company = summary.company.clone();
    }
    if detail.city.is_none() && detail.state.is_none() {
        detail.state = summary.location.clone();
    }
    detail
}
