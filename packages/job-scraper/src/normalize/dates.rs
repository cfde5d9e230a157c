//! Multi-format date parsing.

use chrono::NaiveDate;

/// Accepted input formats, tried in order.
///
/// `%B` formats take full month names only; "Jan 5, 2025" matches none.
pub const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%d %B %Y", "%Y-%m-%d", "%d/%m/%Y"];

const FULL_MONTH: &str = "%B";

/// Written in place of a deadline that could not be parsed.
pub const EXPIRATION_SENTINEL: &str = "9999-01-01";

/// Parse with the first format that accepts the whole string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS.iter().find_map(|format| {
        let date = NaiveDate::parse_from_str(raw, format).ok()?;
        spells_full_month(raw, format, date).then_some(date)
    })
}

/// chrono's `%B` also accepts abbreviations; require the full name.
fn spells_full_month(raw: &str, format: &str, date: NaiveDate) -> bool {
    if !format.contains(FULL_MONTH) {
        return true;
    }
    let month = date.format(FULL_MONTH).to_string().to_lowercase();
    raw.to_lowercase().contains(&month)
}

/// `YYYY-MM-DD` for a parseable date.
pub fn iso_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// `YYYY-MM-DD`, or the sentinel when the deadline is absent or unparseable.
pub fn expiration_date(raw: Option<&str>) -> String {
    raw.and_then(iso_date)
        .unwrap_or_else(|| EXPIRATION_SENTINEL.to_string())
}
