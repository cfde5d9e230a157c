//! Metadata table resolution.
//!
//! Detail pages carry a labeled key/value list (`ul.job-key-info`). Keys are
//! lower-cased and used verbatim to pick the `JobDetail` fields.

use scraper::Html;
use std::collections::BTreeMap;

use crate::html::{inline_text, select_all, select_first_in, stripped_text};
use crate::types::job::JobDetail;

const ROW_SELECTOR: &str = "ul.job-key-info li";
const KEY_SELECTOR: &str = "span.jkey-title";
const VALUE_SELECTOR: &str = "span.jkey-info";

pub const KEY_EXPERIENCE: &str = "experience";
pub const KEY_QUALIFICATION: &str = "qualification";
pub const KEY_JOB_TYPE: &str = "job type";
pub const KEY_LOCATION: &str = "location";
pub const KEY_CITY: &str = "city";
pub const KEY_JOB_FIELD: &str = "job field";
pub const KEY_SALARY: &str = "salary";

/// Read every key/value row. Later duplicates overwrite earlier ones.
pub fn resolve(document: &Html) -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();
    for row in select_all(document, ROW_SELECTOR) {
        let (Some(key), Some(value)) = (
            select_first_in(row, KEY_SELECTOR),
            select_first_in(row, VALUE_SELECTOR),
        ) else {
            continue;
        };

        let key = inline_text(key).to_lowercase();
        let value = stripped_text(value, " ");
        table.insert(key, value);
    }
    table
}

/// Copy the known keys into their `JobDetail` fields.
pub fn apply(detail: &mut JobDetail, table: &BTreeMap<String, String>) {
    let get = |key: &str| table.get(key).filter(|v| !v.trim().is_empty()).cloned();

    detail.experience = get(KEY_EXPERIENCE);
    detail.qualification = get(KEY_QUALIFICATION);
    detail.job_type = get(KEY_JOB_TYPE);
    detail.state = get(KEY_LOCATION);
    detail.city = get(KEY_CITY);
    detail.field = get(KEY_JOB_FIELD);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::DetailPage;

    #[test]
    fn test_keys_are_lowercased() {
        let doc = Html::parse_document(
            &DetailPage::new()
                .key_info("Job Type", "Full Time")
                .key_info("JOB FIELD", "Engineering <a href=\"#\">Civil</a>")
                .render(),
        );
        let table = resolve(&doc);
        assert_eq!(table.get("job type").map(String::as_str), Some("Full Time"));
        assert_eq!(table.get("job field").map(String::as_str), Some("Engineering Civil"));
    }

    #[test]
    fn test_rows_missing_a_span_are_skipped() {
        let doc = Html::parse_document(
            "<ul class=\"job-key-info\"><li><span class=\"jkey-title\">City</span></li>\
             <li><span class=\"jkey-title\">Location</span>\
             <span class=\"jkey-info\">Abuja</span></li></ul>",
        );
        let table = resolve(&doc);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("location").map(String::as_str), Some("Abuja"));
    }

    #[test]
    fn test_apply_maps_known_keys_only() {
        let mut table = BTreeMap::new();
        table.insert("location".to_string(), "Lagos".to_string());
        table.insert("city".to_string(), " ".to_string());
        table.insert("experience level".to_string(), "Senior".to_string());

        let mut detail = JobDetail::new("u");
        apply(&mut detail, &table);

        assert_eq!(detail.state.as_deref(), Some("Lagos"));
        assert!(detail.city.is_none());
        // "experience level" is not the verbatim "experience" key
        assert!(detail.experience.is_none());
    }
}
