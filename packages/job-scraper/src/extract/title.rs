//! Title and company resolution.
//!
//! Postings are headlined "<title> at <company>". When the delimiter is
//! missing the company comes from the dedicated company block instead.

use scraper::Html;

use crate::html::{inline_text, non_empty, select_first};

const TITLE_SELECTOR: &str = "h1";
const COMPANY_SELECTOR: &str = "div.company-name a";
const DELIMITER: &str = " at ";

/// Split "<title> at <company>" on the first delimiter.
///
/// Without a delimiter the whole text is the title and the company is `None`.
pub fn split_title_company(text: &str) -> (String, Option<String>) {
    match text.split_once(DELIMITER) {
        Some((title, company)) => (title.trim().to_string(), non_empty(company)),
        None => (text.trim().to_string(), None),
    }
}

/// Resolve `(title, company)` from a detail page.
pub fn resolve(document: &Html) -> (Option<String>, Option<String>) {
    let heading = select_first(document, TITLE_SELECTOR)
        .map(inline_text)
        .and_then(non_empty);

    let Some(heading) = heading else {
        return (None, company_block(document));
    };

    match split_title_company(&heading) {
        (title, Some(company)) => (non_empty(title), Some(company)),
        (title, None) => (non_empty(title), company_block(document)),
    }
}

fn company_block(document: &Html) -> Option<String> {
    select_first(document, COMPANY_SELECTOR)
        .map(inline_text)
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::DetailPage;

    #[test]
    fn test_split_on_first_delimiter() {
        assert_eq!(
            split_title_company("HR Associate at HR Aid at Lagos"),
            ("HR Associate".to_string(), Some("HR Aid at Lagos".to_string()))
        );
        assert_eq!(split_title_company("  Driver "), ("Driver".to_string(), None));
    }

    #[test]
    fn test_delimiter_is_case_and_space_sensitive() {
        // "Data" contains "at" but not " at "
        assert_eq!(split_title_company("Data Analyst"), ("Data Analyst".to_string(), None));
        assert_eq!(split_title_company("Chef AT Hotel"), ("Chef AT Hotel".to_string(), None));
    }

    #[test]
    fn test_resolve_from_heading() {
        let doc = Html::parse_document(
            &DetailPage::new()
                .heading("Accountant at Acme Ltd")
                .company("Ignored")
                .render(),
        );
        assert_eq!(
            resolve(&doc),
            (Some("Accountant".to_string()), Some("Acme Ltd".to_string()))
        );
    }

    #[test]
    fn test_resolve_falls_back_to_company_block() {
        let doc = Html::parse_document(
            &DetailPage::new()
                .heading("Accountant")
                .company("Acme Ltd")
                .render(),
        );
        assert_eq!(
            resolve(&doc),
            (Some("Accountant".to_string()), Some("Acme Ltd".to_string()))
        );
    }

    #[test]
    fn test_resolve_without_heading() {
        let doc = Html::parse_document(&DetailPage::new().render());
        assert_eq!(resolve(&doc), (None, None));
    }
}
