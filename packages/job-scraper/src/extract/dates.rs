//! Posted and deadline date resolution.
//!
//! Each date sits next to a bold marker with a distinguishing style class.
//! The marker's enclosing element holds "Posted: <date>" or
//! "Deadline: <date>"; the label is stripped and the rest kept raw.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use crate::html::{collapse_whitespace, non_empty, select_first, stripped_text};

const POSTED_MARKER: &str = "b.tc-o";
const DEADLINE_MARKER: &str = "b.tc-bl3";

static POSTED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*posted\s*:\s*").unwrap());
static DEADLINE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*deadline\s*:\s*").unwrap());

/// Raw posted date text, label removed.
pub fn posted(document: &Html) -> Option<String> {
    marker_text(document, POSTED_MARKER, &POSTED_LABEL)
}

/// Raw deadline text, label removed.
pub fn deadline(document: &Html) -> Option<String> {
    marker_text(document, DEADLINE_MARKER, &DEADLINE_LABEL)
}

fn marker_text(document: &Html, marker: &str, label: &Regex) -> Option<String> {
    let marker = select_first(document, marker)?;
    let parent = marker.parent().and_then(ElementRef::wrap)?;
    let text = collapse_whitespace(&stripped_text(parent, " "));
    non_empty(label.replace(&text, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::DetailPage;

    #[test]
    fn test_labels_are_stripped() {
        let doc = Html::parse_document(
            &DetailPage::new().posted("Jan 3, 2025").deadline("January 5, 2025").render(),
        );
        assert_eq!(posted(&doc).as_deref(), Some("Jan 3, 2025"));
        assert_eq!(deadline(&doc).as_deref(), Some("January 5, 2025"));
    }

    #[test]
    fn test_label_spacing_and_case_vary() {
        let doc = Html::parse_document(
            "<div><b class=\"tc-o\">POSTED :</b>  Jan 3,\n 2025</div>\
             <div><b class=\"tc-bl3\">deadline  :</b>Not Specified</div>",
        );
        assert_eq!(posted(&doc).as_deref(), Some("Jan 3, 2025"));
        assert_eq!(deadline(&doc).as_deref(), Some("Not Specified"));
    }

    #[test]
    fn test_missing_marker_or_empty_value() {
        let doc = Html::parse_document("<div><b class=\"tc-o\">Posted:</b></div>");
        assert!(posted(&doc).is_none());
        assert!(deadline(&doc).is_none());
    }
}
