//! Fetched page type.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A page returned by a [`PageFetcher`](crate::traits::fetcher::PageFetcher).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects. Relative links on the page resolve
    /// against this, not against the requested URL.
    pub url: String,

    /// Raw markup
    pub body: String,

    /// HTTP status code
    pub status_code: u16,

    /// HTTP headers
    pub headers: HashMap<String, String>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a new fetched page with a 200 status.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            status_code: 200,
            headers: HashMap::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// `scheme://host[:port]` of the final URL, if it parses.
    pub fn origin(&self) -> Option<String> {
        origin_of(&self.url)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// `scheme://host[:port]` of `url`. `None` for unparseable or host-less URLs.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str()?;
    Some(parsed.origin().ascii_serialization())
}
