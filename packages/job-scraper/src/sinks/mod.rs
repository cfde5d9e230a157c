//! Sink adapters.

pub mod api;
pub mod spreadsheet;

pub use api::ApiSink;
pub use spreadsheet::{SheetMode, SpreadsheetSink};
