//! Small helpers over the `scraper` crate.
//!
//! Selectors in this crate are static strings, so a selector that fails to
//! parse is treated like a selector that matches nothing.

use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector, `None` if invalid.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// First element in the document matching `css`.
pub fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    document.select(&selector).next()
}

/// First descendant of `element` matching `css`.
pub fn select_first_in<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    element.select(&selector).next()
}

/// All elements in the document matching `css`, in document order.
pub fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => document.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Text of every descendant text node, each trimmed, empties dropped,
/// joined by `separator`.
pub fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Single-line text of an element: stripped, space-joined, whitespace collapsed.
pub fn inline_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&stripped_text(element, " "))
}

/// Visible text of the whole document, space-joined.
pub fn page_text(document: &Html) -> String {
    stripped_text(document.root_element(), " ")
}

/// Replace CR/LF with spaces and squeeze whitespace runs to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Some(text)` when the trimmed text is non-empty.
pub fn non_empty(text: impl AsRef<str>) -> Option<String> {
    let trimmed = text.as_ref().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lower-cased tag name of an element.
pub fn tag_name(element: ElementRef<'_>) -> String {
    element.value().name().to_ascii_lowercase()
}

/// Following sibling elements of `element`, in document order.
pub fn next_sibling_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}
