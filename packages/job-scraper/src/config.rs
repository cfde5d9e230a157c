//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is built once, either with the `with_*` builders or
//! from the environment, and handed to the pipeline by value. Nothing reads
//! configuration after that.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::filter::FilterConfig;
use crate::sinks::spreadsheet::SheetMode;

pub const DEFAULT_BASE_URL: &str = "https://www.myjobmag.com";
const TODAY_PATH: &str = "/jobs-by-date/today";

/// How page `n > 1` of a listing is addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationStyle {
    /// `<listing>/<n>`
    #[default]
    Path,
    /// `<listing>?page=<n>`
    Query,
}

impl PaginationStyle {
    /// URL of page `page` (1-based). Page 1 is always the listing URL itself.
    pub fn page_url(&self, listing_url: &str, page: u32) -> String {
        if page <= 1 {
            return listing_url.to_string();
        }
        match self {
            PaginationStyle::Path => format!("{}/{page}", listing_url.trim_end_matches('/')),
            PaginationStyle::Query => {
                let sep = if listing_url.contains('?') { '&' } else { '?' };
                format!("{listing_url}{sep}page={page}")
            }
        }
    }
}

impl FromStr for PaginationStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            other => Err(ConfigError::invalid(
                "JOBS_PAGINATION",
                other,
                "expected \"path\" or \"query\"",
            )),
        }
    }
}

/// Where and how far to walk the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Site root; relative listing links resolve against it
    pub base_url: String,
    /// Page-1 listing URL
    pub listing_url: String,
    pub pagination: PaginationStyle,
    /// Stop after this many summaries, even mid-page
    pub max_jobs: Option<usize>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self::for_site(DEFAULT_BASE_URL)
    }
}

impl ListingConfig {
    /// Listing of today's jobs on `base_url`.
    pub fn for_site(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            listing_url: format!("{base_url}{TODAY_PATH}"),
            base_url,
            pagination: PaginationStyle::Path,
            max_jobs: None,
        }
    }

    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = Some(max_jobs);
        self
    }
}

/// Crawl pacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolitenessConfig {
    /// Pause between listing pages
    pub page_delay: Duration,
    /// Minimum spacing between detail fetches to one host
    pub detail_delay: Duration,
    /// Detail pages processed at once
    pub concurrency: usize,
    pub user_agent: Option<String>,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(1000),
            detail_delay: Duration::from_millis(1500),
            concurrency: 1,
            user_agent: None,
        }
    }
}

impl PolitenessConfig {
    /// No delays at all. Meant for tests and local fixtures.
    pub fn none() -> Self {
        Self {
            page_delay: Duration::ZERO,
            detail_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Set the worker count. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Which sinks the binary wires up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkConfig {
    /// API base; records go to `<base>/v1/store-job-api`
    pub api_base_url: Option<String>,
    pub sheet_path: Option<PathBuf>,
    pub sheet_mode: SheetMode,
}

impl SinkConfig {
    pub fn with_api(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(base_url.into());
        self
    }

    pub fn with_sheet(mut self, path: impl Into<PathBuf>, mode: SheetMode) -> Self {
        self.sheet_path = Some(path.into());
        self.sheet_mode = mode;
        self
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub listing: ListingConfig,
    pub politeness: PolitenessConfig,
    pub filter: FilterConfig,
    /// Cap on forwarded records; `None` forwards every qualified record
    pub sample_size: Option<usize>,
    pub sinks: SinkConfig,
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_politeness(mut self, politeness: PolitenessConfig) -> Self {
        self.politeness = politeness;
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sample_size(mut self, k: usize) -> Self {
        self.sample_size = Some(k);
        self
    }

    pub fn with_sinks(mut self, sinks: SinkConfig) -> Self {
        self.sinks = sinks;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<L>(lookup: L) -> ConfigResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get("JOBS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut listing = ListingConfig::for_site(base_url);
        if let Some(url) = get("JOBS_LISTING_URL") {
            listing.listing_url = url;
        }
        if let Some(style) = get("JOBS_PAGINATION") {
            listing.pagination = style.parse()?;
        }
        listing.max_jobs = parse_opt(&get, "JOBS_MAX_JOBS")?;

        let mut politeness = PolitenessConfig::default();
        if let Some(ms) = parse_opt::<u64, _>(&get, "JOBS_PAGE_DELAY_MS")? {
            politeness.page_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_opt::<u64, _>(&get, "JOBS_DETAIL_DELAY_MS")? {
            politeness.detail_delay = Duration::from_millis(ms);
        }
        if let Some(n) = parse_opt::<usize, _>(&get, "JOBS_CONCURRENCY")? {
            if n == 0 {
                return Err(ConfigError::invalid("JOBS_CONCURRENCY", "0", "must be at least 1"));
            }
            politeness.concurrency = n;
        }
        politeness.user_agent = get("JOBS_USER_AGENT");

        let filter = match get("JOBS_FILTER_FILE") {
            Some(path) => FilterConfig::from_file(path)?,
            None => FilterConfig::default(),
        };

        let mut sinks = SinkConfig {
            api_base_url: get("API_BASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            sheet_path: get("JOBS_SHEET_PATH").map(PathBuf::from),
            ..SinkConfig::default()
        };
        if let Some(mode) = get("JOBS_SHEET_MODE") {
            sinks.sheet_mode = mode.parse()?;
        }

        Ok(Self {
            listing,
            politeness,
            filter,
            sample_size: parse_opt(&get, "JOBS_SAMPLE_SIZE")?,
            sinks,
        })
    }
}

impl FilterConfig {
    /// Load filter rules from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn parse_opt<T, G>(get: &G, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(key, raw.clone(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listing.base_url, "https://www.myjobmag.com");
        assert_eq!(config.listing.listing_url, "https://www.myjobmag.com/jobs-by-date/today");
        assert_eq!(config.listing.pagination, PaginationStyle::Path);
        assert_eq!(config.listing.max_jobs, None);
        assert_eq!(config.politeness, PolitenessConfig::default());
        assert_eq!(config.sample_size, None);
        assert_eq!(config.sinks, SinkConfig::default());
        assert!(config.filter.required_fields.is_empty());
    }

    #[test]
    fn test_values_are_read() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("JOBS_BASE_URL", "https://jobs.example.com/"),
            ("JOBS_PAGINATION", "Query"),
            ("JOBS_MAX_JOBS", "40"),
            ("JOBS_PAGE_DELAY_MS", "0"),
            ("JOBS_DETAIL_DELAY_MS", "250"),
            ("JOBS_CONCURRENCY", "4"),
            ("JOBS_SAMPLE_SIZE", "7"),
            ("API_BASE_URL", "https://api.example.com/"),
            ("JOBS_SHEET_PATH", "/tmp/jobs.csv"),
            ("JOBS_SHEET_MODE", "append"),
        ]))
        .unwrap();

        assert_eq!(config.listing.listing_url, "https://jobs.example.com/jobs-by-date/today");
        assert_eq!(config.listing.pagination, PaginationStyle::Query);
        assert_eq!(config.listing.max_jobs, Some(40));
        assert_eq!(config.politeness.page_delay, Duration::ZERO);
        assert_eq!(config.politeness.detail_delay, Duration::from_millis(250));
        assert_eq!(config.politeness.concurrency, 4);
        assert_eq!(config.sample_size, Some(7));
        assert_eq!(config.sinks.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.sinks.sheet_path, Some(PathBuf::from("/tmp/jobs.csv")));
        assert_eq!(config.sinks.sheet_mode, SheetMode::Append);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = PipelineConfig::from_lookup(lookup(&[("JOBS_MAX_JOBS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "JOBS_MAX_JOBS"));

        let err =
            PipelineConfig::from_lookup(lookup(&[("JOBS_PAGINATION", "cursor")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = PipelineConfig::from_lookup(lookup(&[("JOBS_CONCURRENCY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_missing_filter_file_is_an_error() {
        let err = PipelineConfig::from_lookup(lookup(&[(
            "JOBS_FILTER_FILE",
            "/nonexistent/job-scraper/filters.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_filter_file_partial_keys() {
        let path = std::env::temp_dir()
            .join(format!("job-scraper-filter-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"required_fields": ["title"], "require_salary": true}"#).unwrap();

        let filter = FilterConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(filter.required_fields, vec!["title".to_string()]);
        assert!(filter.require_salary);
        assert!(filter.industries.is_empty());
        assert_eq!(filter.min_experience, None);
    }

    #[test]
    fn test_page_urls() {
        let listing = "https://www.myjobmag.com/jobs-by-date/today";
        assert_eq!(PaginationStyle::Path.page_url(listing, 1), listing);
        assert_eq!(
            PaginationStyle::Path.page_url(listing, 3),
            "https://www.myjobmag.com/jobs-by-date/today/3"
        );
        assert_eq!(
            PaginationStyle::Query.page_url(listing, 2),
            "https://www.myjobmag.com/jobs-by-date/today?page=2"
        );
        assert_eq!(
            PaginationStyle::Query.page_url("https://x.test/jobs?sort=new", 2),
            "https://x.test/jobs?sort=new&page=2"
        );
    }
}
