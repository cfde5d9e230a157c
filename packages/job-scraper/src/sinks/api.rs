//! JSON API sink.
//!
//! Each record is POSTed on its own to `<base>/v1/store-job-api`. 200 and
//! 201 count as delivered; any other answer fails that record only.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{SinkError, SinkResult};
use crate::traits::sink::{JobSink, SinkReport};
use crate::types::job::JobRecord;

pub const STORE_JOB_PATH: &str = "/v1/store-job-api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pushes records to the job store API.
pub struct ApiSink {
    client: reqwest::Client,
    endpoint: String,
}

impl ApiSink {
    /// Create a sink for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> SinkResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| SinkError::Http(Box::new(e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a sink that reuses an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{STORE_JOB_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one record.
    pub async fn post(&self, record: &JobRecord) -> SinkResult<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| SinkError::Http(Box::new(e)))?;

        let status = resp.status().as_u16();
        if matches!(status, 200 | 201) {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(SinkError::Rejected { status, body })
    }
}

#[async_trait]
impl JobSink for ApiSink {
    fn name(&self) -> &str {
        "api"
    }

    async fn push(&self, records: &[JobRecord]) -> SinkReport {
        let mut report = SinkReport::default();
        for record in records {
            match self.post(record).await {
                Ok(()) => {
                    info!(
                        url = %record.source_url,
                        stage = "sink",
                        sink = "api",
                        title = record.title.as_deref().unwrap_or_default(),
                        "Record pushed"
                    );
                    report.succeeded += 1;
                }
                Err(e) => {
                    warn!(
                        url = %record.source_url,
                        stage = "sink",
                        sink = "api",
                        error = %e,
                        "Record push failed"
                    );
                    report.failed += 1;
                }
            }
        }
        report
    }
}
