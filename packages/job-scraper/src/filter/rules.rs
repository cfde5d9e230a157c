//! The individual filter rules, in priority order.

use serde::Serialize;

use super::FilterConfig;
use crate::types::job::JobRecord;

/// One qualification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRule {
    RequiredFields,
    EmailApplication,
    AllowedIndustries,
    BlockedIndustries,
    AllowedJobTypes,
    AllowedLocations,
    MinimumExperience,
    SalaryRequired,
}

/// Salary values that mean "no salary given".
const NO_SALARY: &[&str] = &["not stated", "not specified"];

impl FilterRule {
    /// Evaluation order. The first failing rule decides.
    pub const ORDER: [FilterRule; 8] = [
        FilterRule::RequiredFields,
        FilterRule::EmailApplication,
        FilterRule::AllowedIndustries,
        FilterRule::BlockedIndustries,
        FilterRule::AllowedJobTypes,
        FilterRule::AllowedLocations,
        FilterRule::MinimumExperience,
        FilterRule::SalaryRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterRule::RequiredFields => "required_fields",
            FilterRule::EmailApplication => "email_application",
            FilterRule::AllowedIndustries => "allowed_industries",
            FilterRule::BlockedIndustries => "blocked_industries",
            FilterRule::AllowedJobTypes => "allowed_job_types",
            FilterRule::AllowedLocations => "allowed_locations",
            FilterRule::MinimumExperience => "minimum_experience",
            FilterRule::SalaryRequired => "salary_required",
        }
    }

    /// `Some(reason)` when the record fails this rule.
    pub fn check(&self, record: &JobRecord, config: &FilterConfig) -> Option<String> {
        match self {
            FilterRule::RequiredFields => config
                .required_fields
                .iter()
                .find(|field| {
                    record
                        .field_text(field)
                        .map_or(true, |value| value.trim().is_empty())
                })
                .map(|field| format!("Missing required field: {field}")),

            FilterRule::EmailApplication => record
                .url
                .as_deref()
                .filter(|url| is_email_application(url))
                .map(|_| "Email-based application excluded".to_string()),

            FilterRule::AllowedIndustries => {
                if config.industries.is_empty() {
                    return None;
                }
                let industry = record.industry.as_deref().unwrap_or_default();
                let allowed = lowered(&config.industries);
                let matched = industry_parts(industry)
                    .any(|part| {
                        allowed
                            .iter()
                            .any(|term| part == *term || part.contains(term.as_str()))
                    });
                (!matched).then(|| format!("Industry not in allowed list: {}", display(industry)))
            }

            FilterRule::BlockedIndustries => {
                let industry = record.industry.as_deref()?.to_lowercase();
                config
                    .blocked_industries
                    .iter()
                    .find(|term| contains_term(&industry, term))
                    .map(|term| format!("Blocked industry: {term}"))
            }

            FilterRule::AllowedJobTypes => {
                if config.job_types.is_empty() {
                    return None;
                }
                let job_type = record.job_type.as_deref().unwrap_or_default();
                let lower = job_type.to_lowercase();
                let matched = config.job_types.iter().any(|term| contains_term(&lower, term));
                (!matched).then(|| format!("Job type not allowed: {}", display(job_type)))
            }

            FilterRule::AllowedLocations => {
                if config.locations.is_empty() {
                    return None;
                }
                let location = record.city_state();
                let lower = location.to_lowercase();
                let matched = config.locations.iter().any(|term| contains_term(&lower, term));
                (!matched).then(|| format!("Location not allowed: {}", display(&location)))
            }

            FilterRule::MinimumExperience => {
                let min = config.min_experience?;
                let years = experience_years(&record.experience_level);
                (years < min).then(|| format!("Insufficient experience: {years} < {min}"))
            }

            FilterRule::SalaryRequired => {
                if !config.require_salary {
                    return None;
                }
                let salary = record.salary_range.trim().to_lowercase();
                (salary.is_empty() || NO_SALARY.contains(&salary.as_str()))
                    .then(|| "Salary not specified".to_string())
            }
        }
    }
}

/// Coarse years-of-experience scale.
///
/// "senior" is 5, "mid" is 2, "entry" and "junior" are 0. Anything else,
/// including numeric text, is 0.
pub fn experience_years(text: &str) -> u32 {
    let lower = text.to_lowercase();
    if lower.contains("senior") {
        5
    } else if lower.contains("mid") {
        2
    } else {
        0
    }
}

fn is_email_application(url: &str) -> bool {
    url.trim().to_lowercase().starts_with("mailto:") || url.contains('@')
}

/// Comma-separated industry values, trimmed and lower-cased.
fn industry_parts(industry: &str) -> impl Iterator<Item = String> + '_ {
    industry
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

fn lowered(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Case-insensitive containment; `haystack` is already lower-cased.
fn contains_term(haystack: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    !term.is_empty() && haystack.contains(&term)
}

fn display(value: &str) -> &str {
    if value.trim().is_empty() {
        "none"
    } else {
        value
    }
}
