//! Rule-based qualification of job records.
//!
//! Rules run in a fixed priority order and the first failing rule decides
//! the outcome. A rule whose list is empty (or whose flag is unset) always
//! passes, so the default [`FilterConfig`] passes everything.

pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::job::JobRecord;

pub use rules::{experience_years, FilterRule};

/// Business rule set for one run.
///
/// Every key is optional when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Fields that must be present and non-blank (payload names)
    pub required_fields: Vec<String>,
    /// Allowed industries; empty allows all
    pub industries: Vec<String>,
    pub blocked_industries: Vec<String>,
    /// Allowed job types; empty allows all
    pub job_types: Vec<String>,
    /// Allowed location terms; empty allows all
    pub locations: Vec<String>,
    /// Minimum years on the coarse experience scale
    pub min_experience: Option<u32>,
    pub require_salary: bool,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocked_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_industries = industries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_job_types<I, S>(mut self, job_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_types = job_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_experience(mut self, years: u32) -> Self {
        self.min_experience = Some(years);
        self
    }

    pub fn with_require_salary(mut self, require: bool) -> Self {
        self.require_salary = require;
        self
    }
}

/// Pass/fail outcome for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDecision {
    pub passed: bool,
    /// Human-readable reason; names the failing rule on rejection
    pub reason: String,
    /// The rule that rejected the record, `None` when it passed
    pub rule: Option<FilterRule>,
}

impl FilterDecision {
    pub const PASSED_REASON: &'static str = "Passed all filters";

    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: Self::PASSED_REASON.to_string(),
            rule: None,
        }
    }

    pub fn reject(rule: FilterRule, reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
            rule: Some(rule),
        }
    }
}

/// Evaluates records against a fixed [`FilterConfig`].
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run every rule in priority order, stopping at the first failure.
    pub fn evaluate(&self, record: &JobRecord) -> FilterDecision {
        let decision = evaluate(record, &self.config);
        debug!(
            url = %record.source_url,
            stage = "filter",
            passed = decision.passed,
            reason = %decision.reason,
            "Record evaluated"
        );
        decision
    }
}

/// Pure rule evaluation, no logging.
pub fn evaluate(record: &JobRecord, config: &FilterConfig) -> FilterDecision {
    FilterRule::ORDER
        .iter()
        .find_map(|rule| {
            rule.check(record, config)
                .map(|reason| FilterDecision::reject(*rule, reason))
        })
        .unwrap_or_else(FilterDecision::pass)
}
