//! Job types - listing summaries, raw details and canonical records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry on a listing page.
///
/// `link` is absolute and unique within a run; it is the join key to the
/// [`JobDetail`] scraped from that page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: String,
}

impl JobSummary {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: None,
            location: None,
            link: link.into(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Raw, possibly partial fields scraped from one detail page.
///
/// Every field is optional: a resolver that cannot find its element
/// leaves the field `None` and the normalizer applies a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    pub title: Option<String>,
    pub company: Option<String>,
    pub experience: Option<String>,
    pub qualification: Option<String>,
    pub job_type: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub salary_raw: Option<String>,
    /// Job field / industry, e.g. "IT / Software, Engineering"
    pub field: Option<String>,
    pub posted_date_raw: Option<String>,
    pub deadline_raw: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    /// Absolute apply URL or `mailto:` link
    pub application_method: Option<String>,
    /// Flattened text of the application section
    pub application_instructions: Option<String>,
    pub source_url: String,

    /// Every key/value pair from the metadata table, keys lower-cased.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl JobDetail {
    /// Create an empty detail for a page URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Default::default()
        }
    }
}

/// Canonical, sink-ready job.
///
/// Serializes to the API payload; fields marked `skip` are carried for
/// filtering and the spreadsheet sink but never pushed to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub responsibilities: Option<String>,
    /// Application URL or `mailto:` link
    pub url: Option<String>,
    /// `YYYY-MM-DD`, or the far-future sentinel when the deadline did not parse
    pub expiration_date: String,
    pub location: String,
    pub job_type: Option<String>,
    pub employment_type: String,
    pub experience_level: String,
    pub qualifications: Option<String>,
    pub skills: Vec<String>,
    pub currency: String,
    pub salary_range: String,
    pub pay_schedule: String,
    pub benefits: String,

    #[serde(skip)]
    pub industry: Option<String>,
    #[serde(skip)]
    pub city: Option<String>,
    #[serde(skip)]
    pub state: Option<String>,
    #[serde(skip)]
    pub posted_date: Option<String>,
    #[serde(skip)]
    pub source_url: String,
}

impl JobRecord {
    /// Look up a field by payload name for rule evaluation.
    ///
    /// Returns `None` for absent fields and for names the record does not
    /// know; skills are joined with `", "`.
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "company" => self.company.clone(),
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "overview" => self.overview.clone(),
            "responsibilities" => self.responsibilities.clone(),
            "url" | "apply_now" | "application_url" => self.url.clone(),
            "expiration_date" | "deadline" => Some(self.expiration_date.clone()),
            "location" => Some(self.location.clone()),
            "job_type" => self.job_type.clone(),
            "employment_type" => Some(self.employment_type.clone()),
            "experience_level" | "experience" => Some(self.experience_level.clone()),
            "qualifications" | "qualification" => self.qualifications.clone(),
            "skills" => Some(self.skills.join(", ")),
            "currency" => Some(self.currency.clone()),
            "salary_range" | "salary" => Some(self.salary_range.clone()),
            "pay_schedule" => Some(self.pay_schedule.clone()),
            "benefits" => Some(self.benefits.clone()),
            "industry" | "field" | "job_field" => self.industry.clone(),
            "city" => self.city.clone(),
            "state" => self.state.clone(),
            "posted_date" => self.posted_date.clone(),
            "source_url" => Some(self.source_url.clone()),
            _ => None,
        }
    }

    /// City and state joined by a space, without the country default.
    pub fn city_state(&self) -> String {
        [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
