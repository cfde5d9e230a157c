//! Job Board Ingestion Library
//!
//! Walks a paginated job listing, extracts structured fields from each
//! loosely-consistent detail page, normalizes them into a canonical record,
//! filters the result set and hands it to one or more sinks.
//!
//! # Design Philosophy
//!
//! - Fetching and delivery sit behind traits; everything between is pure
//! - Field resolvers never fail, they return `None` and defaults apply later
//! - One bad job never stops a run
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_scraper::{FilterConfig, HttpFetcher, Pipeline, PipelineConfig};
//! use job_scraper::testing::MemorySink;
//!
//! let config = PipelineConfig::new()
//!     .with_filter(FilterConfig::new().with_required_fields(["title", "url"]))
//!     .with_sample_size(20);
//!
//! let report = Pipeline::new(HttpFetcher::new()?, config)
//!     .with_sink(MemorySink::new())
//!     .run()
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams to the outside world (PageFetcher, JobSink)
//! - [`types`] - Summaries, raw details, canonical records, fetched pages
//! - [`listing`] - Listing pagination
//! - [`extract`] - Detail page field resolvers
//! - [`normalize`] - Raw detail to canonical record
//! - [`filter`] - Rule-based qualification
//! - [`sampler`] - Uniform sampling without replacement
//! - [`sinks`] - API and spreadsheet delivery
//! - [`pipeline`] - End-to-end orchestration
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod error;
pub mod extract;
pub mod fetchers;
pub mod filter;
pub mod html;
pub mod listing;
pub mod normalize;
pub mod pipeline;
pub mod sampler;
pub mod sinks;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::{ListingConfig, PaginationStyle, PipelineConfig, PolitenessConfig, SinkConfig};
pub use error::{ConfigError, FetchError, PipelineError, SinkError};
pub use traits::{
    fetcher::PageFetcher,
    sink::{JobSink, SinkReport},
};
pub use types::{
    job::{JobDetail, JobRecord, JobSummary},
    page::FetchedPage,
};

// Re-export pipeline stages
pub use extract::DetailExtractor;
pub use filter::{FilterConfig, FilterDecision, FilterEngine, FilterRule};
pub use listing::ListingWalker;
pub use normalize::normalize;
pub use pipeline::{Pipeline, RunReport};
pub use sampler::Sampler;

// Re-export fetchers and sinks
pub use fetchers::{FetcherExt, HttpFetcher, PoliteFetcher};
pub use sinks::{ApiSink, SheetMode, SpreadsheetSink};

// Re-export testing utilities
pub use testing::{MemorySink, MockFetcher};
