//! Core trait abstractions for the job scraper.
//!
//! These traits are the seams to the outside world: page fetching on the
//! way in, record sinks on the way out. Everything between them is pure.

pub mod fetcher;
pub mod sink;
