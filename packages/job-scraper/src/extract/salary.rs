//! Salary resolution.
//!
//! The page text is scanned for a figure following "salary" or
//! "remuneration". The metadata table's salary row is the fallback.

use regex::Regex;
use scraper::Html;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::extract::metadata::KEY_SALARY;
use crate::html::{non_empty, page_text};

static SALARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:salary|remuneration)[:\s]*([₦N]?\s?\d{1,3}(?:[,.\d]*)(?:\s?[KkMm]\b)?)")
        .unwrap()
});

/// Raw salary text, uncleaned.
pub fn resolve(document: &Html, table: &BTreeMap<String, String>) -> Option<String> {
    in_text(&page_text(document)).or_else(|| table.get(KEY_SALARY).and_then(non_empty))
}

fn in_text(text: &str) -> Option<String> {
    SALARY
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str()))
}
