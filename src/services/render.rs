//! HTML presentation of resolved entries.

use chrono::DateTime;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::codec::CodecError;
use crate::models::DisplayEntry;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats unix seconds as `dd/mm/YYYY HH:MM:SS` (UTC).
#[must_use]
pub fn format_timestamp(created_at: i64) -> String {
    DateTime::from_timestamp(created_at, 0)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Renders a batch of entries as a `flow-log` block.
///
/// An entry that failed to resolve becomes an error row; the rest of the
/// batch still renders. An empty batch renders nothing.
#[must_use]
pub fn render_entries(entries: &[Result<DisplayEntry, CodecError>]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"flow-log\">\n");

    for entry in entries {
        match entry {
            Ok(entry) => {
                let class = entry.class_token.as_deref().map_or_else(
                    || "fl--log".to_string(),
                    |token| format!("fl--log {token}"),
                );
                let _ = writeln!(
                    html,
                    "  <div class=\"{}\">\n    <div class=\"fl--log--timestamp\">{}</div>\n    <div class=\"fl--log--message\">{}</div>\n  </div>",
                    encode_double_quoted_attribute(&class),
                    format_timestamp(entry.created_at),
                    encode_text(&entry.formatted_message),
                );
            }
            Err(err) => {
                let _ = writeln!(
                    html,
                    "  <div class=\"fl--log fl--log--error\">\n    <div class=\"fl--log--message\">{}</div>\n  </div>",
                    encode_text(&err.to_string()),
                );
            }
        }
    }

    html.push_str("</div>\n");
    html
}
