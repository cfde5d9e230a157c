//! Detail page extraction.
//!
//! A detail page is handed to a set of independent field resolvers. Each
//! resolver returns its value or `None`; none of them can fail the page.
//! Where a field has several possible sources, the sources are listed as
//! ordered strategies and the first non-empty result wins.

pub mod application;
pub mod dates;
pub mod description;
pub mod metadata;
pub mod salary;
pub mod title;

use scraper::Html;
use tracing::{debug, trace};

use crate::types::{
    job::JobDetail,
    page::{origin_of, FetchedPage},
};

/// A single-strategy resolver over some context.
pub type Resolver<C> = fn(&C) -> Option<String>;

/// Apply `strategies` in order and keep the first non-empty result.
pub fn first_resolved<C>(
    context: &C,
    strategies: &[(&'static str, Resolver<C>)],
) -> Option<String> {
    strategies.iter().find_map(|(name, strategy)| {
        let value = strategy(context).filter(|v| !v.trim().is_empty())?;
        trace!(strategy = %name, "Resolver strategy matched");
        Some(value)
    })
}

/// Turns one detail page into a [`JobDetail`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtractor;

impl DetailExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every field from a fetched page.
    ///
    /// Relative apply links resolve against the page's final URL.
    pub fn extract(&self, page: &FetchedPage) -> JobDetail {
        self.extract_html(&page.body, &page.url)
    }

    /// Extract every field from raw markup served at `url`.
    pub fn extract_html(&self, html: &str, url: &str) -> JobDetail {
        let document = Html::parse_document(html);
        let mut detail = JobDetail::new(url);

        let (title, company) = title::resolve(&document);
        detail.title = title;
        detail.company = company;

        let table = metadata::resolve(&document);
        metadata::apply(&mut detail, &table);

        detail.posted_date_raw = dates::posted(&document);
        detail.deadline_raw = dates::deadline(&document);

        detail.description = description::description(&document);
        detail.overview = description::overview(&document, detail.description.as_deref());
        detail.responsibilities = description::responsibilities(&document);
        detail.requirements = description::requirements(&document);

        let origin = origin_of(url);
        let application = application::resolve(
            &document,
            detail.title.as_deref(),
            origin.as_deref(),
            detail.description.as_deref(),
        );
        detail.application_method = application.method;
        detail.application_instructions = application.instructions;

        detail.salary_raw = salary::resolve(&document, &table);
        detail.metadata = table;

        debug!(
            url = %url,
            stage = "extract",
            has_title = detail.title.is_some(),
            has_company = detail.company.is_some(),
            has_description = detail.description.is_some(),
            has_deadline = detail.deadline_raw.is_some(),
            has_application = detail.application_method.is_some(),
            "Detail page extracted"
        );

        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::DetailPage;

    #[test]
    fn test_first_resolved_keeps_order() {
        let strategies: &[(&str, Resolver<i32>)] = &[
            ("none", |_| None),
            ("blank", |_| Some("  ".to_string())),
            ("first", |n| Some(format!("first {n}"))),
            ("second", |n| Some(format!("second {n}"))),
        ];
        assert_eq!(first_resolved(&7, strategies).as_deref(), Some("first 7"));
    }

    #[test]
    fn test_extract_full_page() {
        let html = DetailPage::new()
            .heading("Accountant at Acme Ltd")
            .key_info("Job Type", "Full Time")
            .key_info("Qualification", "BA/BSc/HND")
            .key_info("Experience", "3 years")
            .key_info("Location", "Lagos")
            .key_info("City", "Ikeja")
            .key_info("Job Field", "Finance / Accounting")
            .posted("Jan 3, 2025")
            .deadline("January 5, 2025")
            .description("<p>Prepare reports in Excel and SQL.</p><p>Salary: N150,000 monthly</p>")
            .application(
                "Method of Application",
                "<p>Apply <a href=\"/apply-now/123\">here</a></p>",
            )
            .render();

        let detail = DetailExtractor::new()
            .extract(&FetchedPage::new("https://www.myjobmag.com/job/accountant-123", html));

        assert_eq!(detail.title.as_deref(), Some("Accountant"));
        assert_eq!(detail.company.as_deref(), Some("Acme Ltd"));
        assert_eq!(detail.job_type.as_deref(), Some("Full Time"));
        assert_eq!(detail.qualification.as_deref(), Some("BA/BSc/HND"));
        assert_eq!(detail.experience.as_deref(), Some("3 years"));
        assert_eq!(detail.state.as_deref(), Some("Lagos"));
        assert_eq!(detail.city.as_deref(), Some("Ikeja"));
        assert_eq!(detail.field.as_deref(), Some("Finance / Accounting"));
        assert_eq!(detail.posted_date_raw.as_deref(), Some("Jan 3, 2025"));
        assert_eq!(detail.deadline_raw.as_deref(), Some("January 5, 2025"));
        assert_eq!(detail.salary_raw.as_deref(), Some("N150,000"));
        assert_eq!(
            detail.application_method.as_deref(),
            Some("https://www.myjobmag.com/apply-now/123")
        );
        assert_eq!(
            detail.description.as_deref(),
            Some("Prepare reports in Excel and SQL.\nSalary: N150,000 monthly")
        );
        assert_eq!(detail.source_url, "https://www.myjobmag.com/job/accountant-123");
    }

    #[test]
    fn test_extract_empty_page_degrades_to_none() {
        let detail = DetailExtractor::new()
            .extract_html("<html><body></body></html>", "https://x.test/job/1");
        assert_eq!(detail, JobDetail::new("https://x.test/job/1"));
    }
}
