//! Description, overview and section resolvers.

use scraper::{ElementRef, Html};

use crate::html::{
    collapse_whitespace, inline_text, next_sibling_elements, non_empty, select_all, select_first,
    stripped_text, tag_name,
};

const DESCRIPTION_SELECTORS: &[&str] = &[
    "div.job-details-section",
    "div.job-description",
    "div[class*='description']",
    "div.job-details",
    "section.job-content",
    "div#job-description",
];

const OVERVIEW_SELECTORS: &[&str] = &[
    "div.job-overview",
    "div.job-summary",
    "div[class*='overview']",
    "div[class*='summary']",
    "section.overview",
    "div.description-summary",
];

const FIRST_PARAGRAPH: &str = "div.job-details-section p";

const SECTION_HEADINGS: &str = "h2, h3, h4, strong, b";

const RESPONSIBILITY_PATTERNS: &[&str] = &[
    "responsibilities",
    "duties",
    "key responsibilities",
    "what you'll do",
];

const REQUIREMENT_PATTERNS: &[&str] = &[
    "requirements",
    "qualifications",
    "what we're looking for",
    "you should have",
];

/// Bold text longer than this ends a section, shorter bold text is inline.
const BOLD_BREAK_LEN: usize = 20;

/// Full description text, one line per text node.
pub fn description(document: &Html) -> Option<String> {
    DESCRIPTION_SELECTORS.iter().find_map(|css| {
        let element = select_first(document, css)?;
        non_empty(stripped_text(element, "\n"))
    })
}

/// Single-line overview of the posting.
///
/// Dedicated overview blocks win, then the description's first paragraph,
/// then the whole description collapsed to one line.
pub fn overview(document: &Html, description: Option<&str>) -> Option<String> {
    OVERVIEW_SELECTORS
        .iter()
        .find_map(|css| select_first(document, css).map(inline_text).and_then(non_empty))
        .or_else(|| select_first(document, FIRST_PARAGRAPH).map(inline_text).and_then(non_empty))
        .or_else(|| description.map(collapse_whitespace).and_then(non_empty))
}

/// The responsibilities section, if the page has one.
pub fn responsibilities(document: &Html) -> Option<String> {
    section(document, RESPONSIBILITY_PATTERNS)
}

/// The requirements section, if the page has one.
pub fn requirements(document: &Html) -> Option<String> {
    section(document, REQUIREMENT_PATTERNS)
}

/// Text of the first heading section matching any of `patterns`.
///
/// A heading matches when its lower-cased text contains a pattern. Its
/// content is every following sibling up to the next heading. Headings
/// with no content are skipped.
fn section(document: &Html, patterns: &[&str]) -> Option<String> {
    select_all(document, SECTION_HEADINGS)
        .into_iter()
        .filter(|heading| {
            let text = inline_text(*heading).to_lowercase();
            patterns.iter().any(|p| text.contains(p))
        })
        .find_map(|heading| {
            let lines: Vec<String> = next_sibling_elements(heading)
                .take_while(|sibling| !ends_section(*sibling))
                .map(|sibling| stripped_text(sibling, "\n"))
                .filter(|text| !text.is_empty())
                .collect();
            non_empty(lines.join("\n"))
        })
}

fn ends_section(element: ElementRef<'_>) -> bool {
    match tag_name(element).as_str() {
        "h2" | "h3" | "h4" => true,
        "strong" | "b" => stripped_text(element, "").chars().count() > BOLD_BREAK_LEN,
        _ => false,
    }
}
