//! Sink trait for delivering qualified records.

use async_trait::async_trait;

use crate::types::job::JobRecord;

/// Per-sink delivery tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl SinkReport {
    pub fn all_failed(count: usize) -> Self {
        Self {
            succeeded: 0,
            failed: count,
        }
    }

    pub fn merge(&mut self, other: SinkReport) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// Consumes the final record sequence.
///
/// A sink never aborts a run: per-record failures are logged and counted
/// in the returned report.
#[async_trait]
pub trait JobSink: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Deliver a batch of records.
    async fn push(&self, records: &[JobRecord]) -> SinkReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut total = SinkReport::default();
        total.merge(SinkReport {
            succeeded: 2,
            failed: 1,
        });
        total.merge(SinkReport::all_failed(3));
        assert_eq!(
            total,
            SinkReport {
                succeeded: 2,
                failed: 4
            }
        );
    }
}
