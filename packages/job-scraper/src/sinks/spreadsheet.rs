//! Spreadsheet sink writing a CSV worksheet.
//!
//! "Replace" truncates the worksheet and writes a header row. "Append" adds
//! rows after existing content and writes the header only when the file is
//! new or empty.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{ConfigError, SinkResult};
use crate::traits::sink::{JobSink, SinkReport};
use crate::types::job::JobRecord;

/// Worksheet column order.
pub const COLUMNS: [&str; 13] = [
    "Title",
    "Company",
    "Experience",
    "Qualification",
    "Job Type",
    "State",
    "City",
    "Salary",
    "Field",
    "Posted on",
    "Deadline",
    "Description",
    "Apply Now",
];

/// How a run's rows relate to what is already in the worksheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetMode {
    #[default]
    Replace,
    Append,
}

impl FromStr for SheetMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(ConfigError::invalid(
                "JOBS_SHEET_MODE",
                other,
                "expected \"replace\" or \"append\"",
            )),
        }
    }
}

/// Writes records to a CSV file.
#[derive(Debug, Clone)]
pub struct SpreadsheetSink {
    path: PathBuf,
    mode: SheetMode,
}

impl SpreadsheetSink {
    pub fn new(path: impl Into<PathBuf>, mode: SheetMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> SheetMode {
        self.mode
    }

    /// Write `records` synchronously. Returns the number of rows written.
    pub fn write(&self, records: &[JobRecord]) -> SinkResult<usize> {
        let (file, write_header) = match self.mode {
            SheetMode::Replace => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&self.path)?;
                (file, true)
            }
            SheetMode::Append => {
                let file = OpenOptions::new().append(true).create(true).open(&self.path)?;
                let empty = file.metadata()?.len() == 0;
                (file, empty)
            }
        };

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header {
            writer.write_record(COLUMNS)?;
        }
        for record in records {
            writer.write_record(row(record))?;
        }
        writer.flush()?;

        Ok(records.len())
    }
}

/// One worksheet row, in [`COLUMNS`] order.
pub fn row(record: &JobRecord) -> [String; 13] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        text(&record.title),
        text(&record.company),
        record.experience_level.clone(),
        text(&record.qualifications),
        text(&record.job_type),
        text(&record.state),
        text(&record.city),
        record.salary_range.clone(),
        text(&record.industry),
        text(&record.posted_date),
        record.expiration_date.clone(),
        text(&record.description),
        text(&record.url),
    ]
}

#[async_trait]
impl JobSink for SpreadsheetSink {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    async fn push(&self, records: &[JobRecord]) -> SinkReport {
        let sink = self.clone();
        let batch = records.to_vec();
        let count = batch.len();

        let result = tokio::task::spawn_blocking(move || sink.write(&batch)).await;
        match result {
            Ok(Ok(written)) => {
                info!(
                    stage = "sink",
                    sink = "spreadsheet",
                    path = %self.path.display(),
                    mode = ?self.mode,
                    rows = written,
                    "Worksheet written"
                );
                SinkReport {
                    succeeded: written,
                    failed: 0,
                }
            }
            Ok(Err(e)) => {
                warn!(
                    stage = "sink",
                    sink = "spreadsheet",
                    path = %self.path.display(),
                    error = %e,
                    "Worksheet write failed"
                );
                SinkReport::all_failed(count)
            }
            Err(e) => {
                warn!(stage = "sink", sink = "spreadsheet", error = %e, "Worksheet task failed");
                SinkReport::all_failed(count)
            }
        }
    }
}
