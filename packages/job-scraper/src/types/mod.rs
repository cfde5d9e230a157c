//! Data types flowing through the job pipeline.

pub mod job;
pub mod page;
