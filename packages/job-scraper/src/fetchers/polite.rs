//! Politeness wrapper.
//!
//! Wraps any PageFetcher so that consecutive requests to the same upstream
//! host are spaced by at least a fixed delay. Different hosts do not wait
//! on each other, so a worker pool only stalls on the host it is hitting.

use async_trait::async_trait;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchResult;
use crate::traits::fetcher::PageFetcher;
use crate::types::page::FetchedPage;

/// A fetcher wrapper that enforces a minimum spacing per host.
///
/// Uses a keyed governor limiter with one cell per period and no burst.
/// A zero delay disables spacing entirely.
pub struct PoliteFetcher<F: PageFetcher> {
    inner: F,
    limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
    delay: Duration,
}

impl<F: PageFetcher> PoliteFetcher<F> {
    /// Create a new polite fetcher.
    ///
    /// # Arguments
    /// * `fetcher` - The underlying fetcher to wrap
    /// * `delay` - Minimum spacing between requests to one host
    pub fn new(fetcher: F, delay: Duration) -> Self {
        let limiter = Quota::with_period(delay).map(|quota| Arc::new(RateLimiter::keyed(quota)));
        Self {
            inner: fetcher,
            limiter,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Wait until the host behind `url` may be contacted again.
    async fn wait_for_permit(&self, url: &str) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        let host = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default();
        limiter.until_key_ready(&host).await;
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for PoliteFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.wait_for_permit(url).await;
        self.inner.fetch(url).await
    }
}

/// Extension trait for easy politeness wrapping.
pub trait FetcherExt: PageFetcher + Sized {
    /// Space requests to each host by at least `delay`.
    fn polite(self, delay: Duration) -> PoliteFetcher<Self> {
        PoliteFetcher::new(self, delay)
    }
}

impl<F: PageFetcher + Sized> FetcherExt for F {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use std::time::Instant;

    fn mock() -> MockFetcher {
        MockFetcher::new()
            .with_page("https://a.example.com/1", "1")
            .with_page("https://a.example.com/2", "2")
            .with_page("https://b.example.com/1", "3")
    }

    #[tokio::test]
    async fn test_same_host_is_spaced() {
        let fetcher = mock().polite(Duration::from_millis(300));

        let start = Instant::now();
        fetcher.fetch("https://a.example.com/1").await.unwrap();
        fetcher.fetch("https://a.example.com/2").await.unwrap();

        assert!(
            start.elapsed() >= Duration::from_millis(250),
            "Politeness delay not applied: {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_different_hosts_do_not_wait() {
        let fetcher = mock().polite(Duration::from_millis(300));

        let start = Instant::now();
        fetcher.fetch("https://a.example.com/1").await.unwrap();
        fetcher.fetch("https://b.example.com/1").await.unwrap();

        assert!(start.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_zero_delay_disables_limiter() {
        let fetcher = mock().polite(Duration::ZERO);
        assert!(fetcher.limiter.is_none());
        fetcher.fetch("https://a.example.com/1").await.unwrap();
        assert_eq!(fetcher.inner().calls().len(), 1);
    }
}
