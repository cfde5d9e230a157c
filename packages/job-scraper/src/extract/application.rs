//! Application method resolution.
//!
//! The application section is anchored by `h2#application-method`, or else
//! by the first `h2`/`h3` whose text mentions "application". Its content
//! block is the first following sibling `div`. Within that block the
//! strategies run in priority order:
//!
//! 1. the first hyperlink, if it is absolute http(s) or a relative
//!    `/apply-now/` path (resolved against the page origin)
//! 2. a bold element holding an email address
//! 3. any email address in the block's text
//!
//! Emails become `mailto:` links. When the block had a hyperlink that could
//! not be used, the mailto carries `?subject=<encoded title>`; when it had
//! no hyperlink at all, it carries no subject.
//!
//! Pages without an application section fall back to an email address
//! found in the description text.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use crate::extract::{first_resolved, Resolver};
use crate::html::{
    collapse_whitespace, inline_text, next_sibling_elements, non_empty, select_all, select_first,
    select_first_in, selector, stripped_text, tag_name,
};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

const ANCHOR_BY_ID: &str = "h2#application-method";
const ANCHOR_CANDIDATES: &str = "h2, h3";
const ANCHOR_KEYWORD: &str = "application";
const APPLY_NOW_PREFIX: &str = "/apply-now/";
const DEFAULT_SUBJECT: &str = "Job%20Application";

/// Outcome of application resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    /// Absolute apply URL or `mailto:` link
    pub method: Option<String>,
    /// Flattened text of the section's content block
    pub instructions: Option<String>,
}

/// Everything the section strategies look at.
struct Section<'a> {
    block: ElementRef<'a>,
    instructions: String,
    href: Option<String>,
    origin: Option<&'a str>,
    /// `Some` when the block had an unusable hyperlink
    subject: Option<String>,
}

/// Resolve the application method of a detail page.
pub fn resolve(
    document: &Html,
    title: Option<&str>,
    origin: Option<&str>,
    description: Option<&str>,
) -> Application {
    let Some(anchor) = find_anchor(document) else {
        return Application {
            method: description.and_then(email_in).map(|email| mailto(&email, None)),
            instructions: None,
        };
    };

    let Some(block) = next_sibling_elements(anchor).find(|el| tag_name(*el) == "div") else {
        return Application::default();
    };

    let instructions = collapse_whitespace(&stripped_text(block, " "));
    let href = select_first_in(block, "a[href]")
        .and_then(|a| a.value().attr("href"))
        .map(|h| h.trim().to_string());
    let subject = href.as_ref().map(|_| {
        title
            .and_then(non_empty)
            .map(|t| urlencoding::encode(&t).into_owned())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
    });

    let section = Section {
        block,
        instructions,
        href,
        origin,
        subject,
    };

    let strategies: [(&'static str, Resolver<Section<'_>>); 3] = [
        ("hyperlink", from_hyperlink),
        ("bold_email", from_bold_email),
        ("text_email", from_text_email),
    ];

    Application {
        method: first_resolved(&section, &strategies),
        instructions: non_empty(&section.instructions),
    }
}

fn find_anchor(document: &Html) -> Option<ElementRef<'_>> {
    select_first(document, ANCHOR_BY_ID).or_else(|| {
        select_all(document, ANCHOR_CANDIDATES)
            .into_iter()
            .find(|h| inline_text(*h).to_lowercase().contains(ANCHOR_KEYWORD))
    })
}

fn from_hyperlink(section: &Section<'_>) -> Option<String> {
    let href = section.href.as_deref()?;
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }
    if href.starts_with(APPLY_NOW_PREFIX) {
        return section.origin.map(|origin| format!("{origin}{href}"));
    }
    None
}

fn from_bold_email(section: &Section<'_>) -> Option<String> {
    let bold = selector("strong, b")?;
    section
        .block
        .select(&bold)
        .map(inline_text)
        .find(|text| text.contains('@'))
        .map(|text| email_in(&text).unwrap_or(text))
        .map(|email| mailto(&email, section.subject.as_deref()))
}

fn from_text_email(section: &Section<'_>) -> Option<String> {
    email_in(&section.instructions).map(|email| mailto(&email, section.subject.as_deref()))
}

fn email_in(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

fn mailto(email: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!("mailto:{email}?subject={subject}"),
        None => format!("mailto:{email}"),
    }
}
