//! Normalization of raw details into canonical records.
//!
//! [`normalize`] is a pure function: the same [`JobDetail`] always yields
//! the same [`JobRecord`]. Absent or unparseable inputs fall back to the
//! documented defaults below instead of failing.

pub mod dates;
pub mod skills;

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::html::{collapse_whitespace, non_empty};
use crate::types::job::{JobDetail, JobRecord};

pub use dates::{expiration_date, iso_date, parse_date, EXPIRATION_SENTINEL};
pub use skills::{tag_skills, SKILL_VOCABULARY};

/// Location when neither city nor state is known.
pub const DEFAULT_LOCATION: &str = "Nigeria";
/// Always written as the employment type, whatever the scraped job type.
pub const EMPLOYMENT_TYPE: &str = "full-time";
pub const DEFAULT_EXPERIENCE: &str = "Not Available";
pub const CURRENCY: &str = "NGN";
pub const DEFAULT_SALARY: &str = "Not Stated";
pub const PAY_SCHEDULE: &str = "Monthly";
pub const BENEFITS: &str = "Not specified";

static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNGN\b\.?").unwrap());
static NAIRA_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[Nn]\s?(\d)").unwrap());

/// Map one raw detail to its canonical record.
pub fn normalize(detail: &JobDetail) -> JobRecord {
    let description = detail.description.as_deref().and_then(non_empty);

    let overview = detail
        .overview
        .as_deref()
        .and_then(non_empty)
        .or_else(|| description.as_deref().map(collapse_whitespace).and_then(non_empty));

    let responsibilities = detail
        .responsibilities
        .as_deref()
        .and_then(non_empty)
        .or_else(|| description.clone());

    let record = JobRecord {
        company: opt(&detail.company),
        title: opt(&detail.title),
        overview,
        responsibilities,
        description: description.clone(),
        url: opt(&detail.application_method),
        expiration_date: expiration_date(detail.deadline_raw.as_deref()),
        location: compose_location(detail.city.as_deref(), detail.state.as_deref()),
        job_type: opt(&detail.job_type),
        employment_type: EMPLOYMENT_TYPE.to_string(),
        experience_level: opt(&detail.experience).unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string()),
        qualifications: opt(&detail.qualification),
        skills: tag_skills(description.as_deref().unwrap_or_default()),
        currency: CURRENCY.to_string(),
        salary_range: clean_salary(detail.salary_raw.as_deref()),
        pay_schedule: PAY_SCHEDULE.to_string(),
        benefits: BENEFITS.to_string(),

        industry: opt(&detail.field),
        city: opt(&detail.city),
        state: opt(&detail.state),
        posted_date: detail
            .posted_date_raw
            .as_deref()
            .and_then(|raw| iso_date(raw).or_else(|| non_empty(raw))),
        source_url: detail.source_url.clone(),
    };

    trace!(
        url = %record.source_url,
        stage = "normalize",
        expiration_date = %record.expiration_date,
        skills = record.skills.len(),
        "Record normalized"
    );

    record
}

/// `"<City>, <State>"`, omitting whichever side is absent.
pub fn compose_location(city: Option<&str>, state: Option<&str>) -> String {
    let parts: Vec<&str> = [city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        DEFAULT_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}

/// Strip currency markers and thousands separators.
///
/// Ranges ("100,000 - 150,000", "100k to 150k") keep their shape. Blank
/// input becomes [`DEFAULT_SALARY`].
pub fn clean_salary(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return DEFAULT_SALARY.to_string();
    };

    let cleaned = raw.replace('₦', "");
    let cleaned = CURRENCY_CODE.replace_all(&cleaned, "");
    let cleaned = NAIRA_PREFIX.replace_all(&cleaned, "$1");
    let cleaned = collapse_whitespace(&cleaned.replace(',', ""));

    if cleaned.is_empty() {
        DEFAULT_SALARY.to_string()
    } else {
        cleaned
    }
}

fn opt(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty)
}
