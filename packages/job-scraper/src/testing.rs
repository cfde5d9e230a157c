//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the job scraper
//! without making real network calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::{
    fetcher::PageFetcher,
    sink::{JobSink, SinkReport},
};
use crate::types::{job::JobRecord, page::FetchedPage};

/// A mock fetcher for testing.
///
/// Returns predefined pages without making network requests. Unknown URLs
/// answer with a 404 status error, like a real site would.
#[derive(Default)]
pub struct MockFetcher {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,

    /// URLs that should fail at the transport level
    fail_urls: Arc<RwLock<HashSet<String>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page served at `url`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), body);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// Serve `body` at `url`, reporting `final_url` as the post-redirect URL.
    pub fn with_redirected_page(
        self,
        url: impl Into<String>,
        final_url: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let page = FetchedPage::new(final_url, body);
        self.pages.write().unwrap().insert(url.into(), page);
        self
    }

    /// Serve `body` at `url` with a non-default status code, for fetchers
    /// that hand back error pages instead of failing.
    pub fn with_status_page(
        self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), body).with_status(status);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().insert(url.into());
        self
    }

    /// Get all URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if self.fail_urls.read().unwrap().contains(url) {
            return Err(FetchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Mock connection refused",
            ))));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// An in-memory sink that records everything pushed to it.
#[derive(Default)]
pub struct MemorySink {
    records: Arc<RwLock<Vec<JobRecord>>>,

    /// Titles whose delivery should be reported as failed
    reject_titles: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail delivery of any record with this title.
    pub fn rejecting(mut self, title: impl Into<String>) -> Self {
        self.reject_titles.insert(title.into());
        self
    }

    /// Records accepted so far.
    pub fn records(&self) -> Vec<JobRecord> {
        self.records.read().unwrap().clone()
    }

    /// A handle sharing storage with this sink, for asserting after the
    /// sink has been moved into a pipeline.
    pub fn handle(&self) -> Arc<RwLock<Vec<JobRecord>>> {
        Arc::clone(&self.records)
    }
}

#[async_trait]
impl JobSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn push(&self, records: &[JobRecord]) -> SinkReport {
        let mut report = SinkReport::default();
        let mut store = self.records.write().unwrap();
        for record in records {
            let rejected = record
                .title
                .as_ref()
                .is_some_and(|t| self.reject_titles.contains(t));
            if rejected {
                report.failed += 1;
            } else {
                store.push(record.clone());
                report.succeeded += 1;
            }
        }
        report
    }
}

/// HTML fixtures shaped like the listing site's markup.
pub mod fixtures {
    /// One listing entry: `(title text, href, location)`.
    pub type ListingItem<'a> = (&'a str, &'a str, Option<&'a str>);

    /// Render a listing page with `li.job-list-li` items.
    pub fn listing_page(items: &[ListingItem<'_>]) -> String {
        let mut html = String::from("<html><body><ul class=\"job-list\">");
        for (title, href, location) in items {
            html.push_str("<li class=\"job-list-li\"><h2><a href=\"");
            html.push_str(href);
            html.push_str("\">");
            html.push_str(title);
            html.push_str("</a></h2>");
            if let Some(location) = location {
                html.push_str("<span><a href=\"/jobs-location/x\">");
                html.push_str(location);
                html.push_str("</a></span>");
            }
            html.push_str("</li>");
        }
        html.push_str("</ul></body></html>");
        html
    }

    /// Builder for detail pages. Every part is optional so tests can
    /// remove exactly the element a resolver depends on.
    #[derive(Debug, Clone, Default)]
    pub struct DetailPage {
        heading: Option<String>,
        company: Option<String>,
        key_info: Vec<(String, String)>,
        posted: Option<String>,
        deadline: Option<String>,
        description: Option<String>,
        application_heading: Option<String>,
        application_body: Option<String>,
        extra: Vec<String>,
    }

    impl DetailPage {
        pub fn new() -> Self {
            Self::default()
        }

        /// `<h1>` text, e.g. "Accountant at Acme Ltd".
        pub fn heading(mut self, text: &str) -> Self {
            self.heading = Some(text.to_string());
            self
        }

        /// `div.company-name a` text.
        pub fn company(mut self, text: &str) -> Self {
            self.company = Some(text.to_string());
            self
        }

        /// A `ul.job-key-info` row.
        pub fn key_info(mut self, key: &str, value: &str) -> Self {
            self.key_info.push((key.to_string(), value.to_string()));
            self
        }

        /// Text following the `b.tc-o` marker, e.g. "Jan 3, 2025".
        pub fn posted(mut self, text: &str) -> Self {
            self.posted = Some(text.to_string());
            self
        }

        /// Text following the `b.tc-bl3` marker, e.g. "January 5, 2025".
        pub fn deadline(mut self, text: &str) -> Self {
            self.deadline = Some(text.to_string());
            self
        }

        /// Inner HTML of `div.job-details-section`.
        pub fn description(mut self, html: &str) -> Self {
            self.description = Some(html.to_string());
            self
        }

        /// Application heading (rendered as `<h2>`) and the inner HTML of
        /// the `div` that follows it.
        pub fn application(mut self, heading: &str, body_html: &str) -> Self {
            self.application_heading = Some(heading.to_string());
            self.application_body = Some(body_html.to_string());
            self
        }

        /// Arbitrary markup appended to the body.
        pub fn extra(mut self, html: &str) -> Self {
            self.extra.push(html.to_string());
            self
        }

        pub fn render(&self) -> String {
            let mut html = String::from("<html><head><title>Job</title></head><body>");
            if let Some(heading) = &self.heading {
                html.push_str(&format!("<h1>{heading}</h1>"));
            }
            if let Some(company) = &self.company {
                html.push_str(&format!(
                    "<div class=\"company-name\"><a href=\"/company/x\">{company}</a></div>"
                ));
            }
            if !self.key_info.is_empty() {
                html.push_str("<ul class=\"job-key-info\">");
                for (key, value) in &self.key_info {
                    html.push_str(&format!(
                        "<li><span class=\"jkey-title\">{key}</span>\
                         <span class=\"jkey-info\">{value}</span></li>"
                    ));
                }
                html.push_str("</ul>");
            }
            if let Some(posted) = &self.posted {
                html.push_str(&format!(
                    "<div class=\"read-date-sec-li\"><b class=\"tc-o\">Posted:</b> {posted}</div>"
                ));
            }
            if let Some(deadline) = &self.deadline {
                html.push_str(&format!(
                    "<div class=\"read-date-sec-li\">\
                     <b class=\"tc-bl3\">Deadline:</b> {deadline}</div>"
                ));
            }
            if let Some(description) = &self.description {
                html.push_str(&format!("<div class=\"job-details-section\">{description}</div>"));
            }
            if let Some(heading) = &self.application_heading {
                html.push_str(&format!("<h2>{heading}</h2>"));
            }
            if let Some(body) = &self.application_body {
                html.push_str(&format!("<div class=\"mag-b bm-b-30\">{body}</div>"));
            }
            for extra in &self.extra {
                html.push_str(extra);
            }
            html.push_str("</body></html>");
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_fetch() {
        let fetcher = MockFetcher::new()
            .with_page("https://example.com/page1", "Content 1")
            .with_page("https://example.com/page2", "Content 2");

        let page = fetcher.fetch("https://example.com/page1").await.unwrap();
        assert_eq!(page.body, "Content 1");

        // Non-existent page should fail with a status error
        let result = fetcher.fetch("https://example.com/missing").await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));

        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_fetcher_fail_url() {
        let fetcher = MockFetcher::new()
            .with_page("https://fail.com", "Content")
            .fail_url("https://fail.com");

        let result = fetcher.fetch("https://fail.com").await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_memory_sink_rejects_by_title() {
        let sink = MemorySink::new().rejecting("Bad");
        let mut good = crate::normalize::normalize(&crate::types::job::JobDetail::new("u1"));
        good.title = Some("Good".to_string());
        let mut bad = good.clone();
        bad.title = Some("Bad".to_string());

        let report = sink.push(&[good, bad]).await;
        assert_eq!(report, SinkReport { succeeded: 1, failed: 1 });
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_listing_fixture_renders_items() {
        let html = fixtures::listing_page(&[("Driver at Acme", "/job/driver-1", Some("Lagos"))]);
        assert!(html.contains("job-list-li"));
        assert!(html.contains("/job/driver-1"));
        assert!(html.contains("Lagos"));
    }
}
