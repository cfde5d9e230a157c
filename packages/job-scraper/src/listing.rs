//! Listing pagination.
//!
//! The walker fetches listing pages 1, 2, 3, ... and yields one
//! [`JobSummary`] per listing item. It stops at the first page that fails
//! to fetch or answers non-2xx, the first page with no listing items, or
//! once `max_jobs` summaries have been produced. Items without a title or
//! link are skipped without ending the walk. The sequence is lazy: nothing is fetched
//! until the stream is polled, and walking again starts over at page 1.

use async_stream::stream;
use futures::{Stream, StreamExt};
use scraper::Html;
use std::collections::HashSet;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ListingConfig;
use crate::extract::title::split_title_company;
use crate::html::{inline_text, non_empty, select_all, select_first_in};
use crate::traits::fetcher::PageFetcher;
use crate::types::job::JobSummary;

const ITEM_SELECTOR: &str = "li.job-list-li";
const TITLE_LINK_SELECTOR: &str = "h2 a";
const LOCATION_SELECTOR: &str = "span a";

/// Result of parsing one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Listing items found, usable or not
    pub item_count: usize,
    /// Items with both a title and a link, in page order
    pub summaries: Vec<JobSummary>,
}

/// Walks a paginated listing.
pub struct ListingWalker<F: PageFetcher> {
    fetcher: F,
    config: ListingConfig,
    page_delay: Duration,
}

impl<F: PageFetcher> ListingWalker<F> {
    /// Create a walker with no delay between pages.
    pub fn new(fetcher: F, config: ListingConfig) -> Self {
        Self {
            fetcher,
            config,
            page_delay: Duration::ZERO,
        }
    }

    /// Pause for `delay` before fetching each page after the first.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Stream the summaries lazily.
    ///
    /// Links already seen in this walk are skipped. Some sites ignore the
    /// page number and serve the same page forever, so the walk also ends
    /// on a page identical to the one before it, or one whose linked items
    /// were all seen already.
    pub fn walk(&self) -> Pin<Box<dyn Stream<Item = JobSummary> + Send + '_>> {
        Box::pin(stream! {
            let max_jobs = self.config.max_jobs;
            if max_jobs == Some(0) {
                return;
            }

            let mut seen: HashSet<String> = HashSet::new();
            let mut emitted = 0usize;
            let mut page = 1u32;
            let mut previous_body: Option<String> = None;

            loop {
                if page > 1 && !self.page_delay.is_zero() {
                    tokio::time::sleep(self.page_delay).await;
                }

                let url = self.config.pagination.page_url(&self.config.listing_url, page);
                let fetched = match self.fetcher.fetch(&url).await {
                    Ok(fetched) if fetched.is_success() => fetched,
                    Ok(fetched) => {
                        warn!(
                            url = %url,
                            stage = "listing",
                            page,
                            status = fetched.status_code,
                            "Listing page unavailable, stopping"
                        );
                        return;
                    }
                    Err(e) => {
                        warn!(
                            url = %url,
                            stage = "listing",
                            page,
                            error = %e,
                            "Listing page unavailable, stopping"
                        );
                        return;
                    }
                };

                if previous_body.as_deref() == Some(fetched.body.as_str()) {
                    info!(
                        url = %url,
                        stage = "listing",
                        page,
                        "Page identical to the previous one, stopping"
                    );
                    return;
                }

                let parsed = parse_listing_page(&fetched.body, &self.config.base_url);
                if parsed.item_count == 0 {
                    info!(
                        url = %url,
                        stage = "listing",
                        page,
                        total = emitted,
                        "No listing items, stopping"
                    );
                    return;
                }

                let linked = parsed.summaries.len();
                let mut fresh = 0usize;
                for summary in parsed.summaries {
                    if !seen.insert(summary.link.clone()) {
                        debug!(
                            url = %summary.link,
                            stage = "listing",
                            "Duplicate listing link skipped"
                        );
                        continue;
                    }
                    fresh += 1;
                    emitted += 1;
                    yield summary;

                    if max_jobs.is_some_and(|max| emitted >= max) {
                        info!(stage = "listing", total = emitted, "Reached job limit");
                        return;
                    }
                }

                info!(
                    url = %url,
                    stage = "listing",
                    page,
                    items = parsed.item_count,
                    new = fresh,
                    "Listing page scraped"
                );
                if linked > 0 && fresh == 0 {
                    info!(
                        url = %url,
                        stage = "listing",
                        page,
                        "Page repeated earlier links, stopping"
                    );
                    return;
                }
                previous_body = Some(fetched.body);
                page += 1;
            }
        })
    }

    /// Walk to the end and collect every summary.
    pub async fn collect_all(&self) -> Vec<JobSummary> {
        self.walk().collect().await
    }
}

/// Parse one listing page. Relative links resolve against `base_url`.
pub fn parse_listing_page(html: &str, base_url: &str) -> ListingPage {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();
    let items = select_all(&document, ITEM_SELECTOR);

    let summaries = items
        .iter()
        .filter_map(|item| {
            let anchor = select_first_in(*item, TITLE_LINK_SELECTOR)?;
            let href = anchor.value().attr("href").and_then(non_empty)?;
            let link = absolutize(base.as_ref(), &href)?;

            let (title, company) = split_title_company(&inline_text(anchor));
            let title = non_empty(title)?;
            let location = select_first_in(*item, LOCATION_SELECTOR)
                .map(inline_text)
                .and_then(non_empty);

            Some(JobSummary {
                title,
                company,
                location,
                link,
            })
        })
        .collect();

    ListingPage {
        item_count: items.len(),
        summaries,
    }
}

fn absolutize(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(String::from),
        None => Url::parse(href).ok().map(String::from),
    }
}
