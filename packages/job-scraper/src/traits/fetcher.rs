//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::FetchedPage;

/// Fetches raw markup for a URL.
///
/// Implementations own retries, timeouts and transport concerns. Any
/// non-2xx response or transport failure must surface as an `Err`; callers
/// treat that as "page unavailable" and never inspect the body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single page by URL.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        (**self).fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[tokio::test]
    async fn test_arc_forwards() {
        let fetcher = std::sync::Arc::new(MockFetcher::new().with_page("https://example.com", "x"));
        let page = fetcher.fetch("https://example.com").await.unwrap();
        assert_eq!(page.body, "x");
    }
}
