//! Page fetcher implementations.
//!
//! - `HttpFetcher` - reqwest-backed fetch of static HTML
//! - `PoliteFetcher` - wrapper that spaces requests per upstream host

pub mod http;
pub mod polite;

pub use http::{HttpFetcher, DEFAULT_USER_AGENT};
pub use polite::{FetcherExt, PoliteFetcher};
