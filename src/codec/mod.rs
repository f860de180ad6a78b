//! Translation between log requests, stored rows and display entries.
//!
//! Messages are never interpolated on write. [`build`] stores the raw template
//! and the encoded arguments side by side; [`resolve`] performs the
//! substitution when an entry is read back for display.

pub mod arguments;
pub mod template;

use thiserror::Error;

use crate::models::{DisplayEntry, LogEntry, NewLogEntry, RawSeverity, Severity};
use arguments::LogValue;

/// Maximum stored length of `category`, in bytes.
pub const CATEGORY_MAX_BYTES: usize = 64;

/// Maximum stored length of `link`, in bytes.
pub const LINK_MAX_BYTES: usize = 255;

const CLASS_PREFIX: &str = "fl--log--type-";

/// Errors raised while building or resolving an entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Template expects {placeholders} argument(s) but {arguments} were supplied")]
    TemplateArgMismatch {
        placeholders: usize,
        arguments: usize,
    },

    #[error("Malformed arguments: {0}")]
    MalformedArguments(String),

    #[error("Unsupported argument encoding version: {0}")]
    UnsupportedEncoding(u32),

    #[error("Placeholder precision {precision} exceeds the maximum of {max}")]
    PrecisionOutOfRange { precision: String, max: usize },
}

/// Truncates `value` to at most `max` bytes without splitting a character.
#[must_use]
pub fn truncate_bytes(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }

    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Validates and normalizes a log request into a persistable entry.
///
/// `category` is cut to 64 bytes and `link` to 255 bytes. The template is
/// stored verbatim; arguments are encoded, not substituted.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSeverity`] if `severity` is not one of the four
/// defined levels, and [`CodecError::MalformedArguments`] if an argument
/// cannot be encoded.
#[allow(clippy::too_many_arguments)]
pub fn build(
    category: &str,
    message_template: &str,
    arguments: &[LogValue],
    subject_id: i64,
    severity: &RawSeverity,
    link: &str,
    actor_id: i64,
    location: &str,
    referer: &str,
) -> Result<NewLogEntry, CodecError> {
    let severity = severity.resolve()?;
    let variables = arguments::encode(arguments)?;

    Ok(NewLogEntry {
        actor_id,
        subject_id,
        category: truncate_bytes(category, CATEGORY_MAX_BYTES).to_string(),
        message: message_template.to_string(),
        variables,
        severity,
        link: truncate_bytes(link, LINK_MAX_BYTES).to_string(),
        location: location.to_string(),
        referer: referer.to_string(),
    })
}

/// Interpolates a stored row into a display entry.
///
/// # Errors
///
/// Returns [`CodecError::TemplateArgMismatch`] if the template and argument
/// counts differ, [`CodecError::InvalidSeverity`] if the stored severity is
/// out of range, [`CodecError::PrecisionOutOfRange`] for an oversized
/// `%.N` precision, or a decoding error if `variables` cannot be read.
pub fn resolve(row: &LogEntry) -> Result<DisplayEntry, CodecError> {
    let args = arguments::decode(&row.variables)?;
    let formatted_message = template::format(&row.message, &args)?;
    let severity = Severity::from_code(i64::from(row.severity))?;

    Ok(DisplayEntry {
        id: row.id,
        formatted_message,
        category: row.category.clone(),
        class_token: class_token(&row.category),
        severity,
        link: row.link.clone(),
        created_at: row.created_at,
    })
}

/// CSS class for a category, or `None` when the category is empty.
///
/// ASCII letters are lowercased; anything outside `[a-z0-9_-]` becomes `-`.
#[must_use]
pub fn class_token(category: &str) -> Option<String> {
    if category.is_empty() {
        return None;
    }

    let sanitized: String = category
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    Some(format!("{CLASS_PREFIX}{sanitized}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_simple(
        category: &str,
        template: &str,
        args: &[LogValue],
        severity: impl Into<RawSeverity>,
        link: &str,
    ) -> Result<NewLogEntry, CodecError> {
        build(
            category,
            template,
            args,
            0,
            &severity.into(),
            link,
            0,
            "http://localhost/",
            "",
        )
    }

    fn row_from(entry: NewLogEntry) -> LogEntry {
        LogEntry {
            id: 1,
            actor_id: entry.actor_id,
            subject_id: entry.subject_id,
            category: entry.category,
            message: entry.message,
            variables: entry.variables,
            severity: entry.severity.code(),
            link: entry.link,
            location: entry.location,
            referer: entry.referer,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_build_truncates_category_to_64_bytes() {
        let entry = build_simple(&"a".repeat(100), "x", &[], Severity::Notice, "").unwrap();
        assert_eq!(entry.category.len(), 64);
    }

    #[test]
    fn test_build_truncates_link_to_255_bytes() {
        let entry = build_simple("c", "x", &[], Severity::Notice, &"b".repeat(300)).unwrap();
        assert_eq!(entry.link.len(), 255);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 'é' is two bytes; 63 ASCII bytes + 'é' would straddle the limit.
        let value = format!("{}é", "a".repeat(63));
        let truncated = truncate_bytes(&value, CATEGORY_MAX_BYTES);
        assert_eq!(truncated.len(), 63);
        assert_eq!(truncate_bytes("short", 64), "short");
    }

    #[test]
    fn test_build_rejects_invalid_severity() {
        let err = build_simple("c", "x", &[], 999_i64, "").unwrap_err();
        assert_eq!(err, CodecError::InvalidSeverity("999".to_string()));

        let err = build_simple("c", "x", &[], "FLOWLOG_EMERGENCY", "").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSeverity(_)));
    }

    #[test]
    fn test_build_accepts_notice() {
        let entry = build_simple("c", "x", &[], Severity::Notice, "").unwrap();
        assert_eq!(entry.severity, Severity::Notice);

        let entry = build_simple("c", "x", &[], 5_i64, "").unwrap();
        assert_eq!(entry.severity, Severity::Notice);
    }

    #[test]
    fn test_build_does_not_interpolate() {
        let entry = build_simple(
            "auth",
            "user %s logged in",
            &[LogValue::from("alice")],
            Severity::Info,
            "",
        )
        .unwrap();
        assert_eq!(entry.message, "user %s logged in");
        assert!(entry.variables.contains("alice"));
    }

    #[test]
    fn test_build_empty_arguments_encode_as_empty_sequence() {
        let entry = build_simple("c", "x", &[], Severity::Debug, "").unwrap();
        assert!(arguments::decode(&entry.variables).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_interpolates() {
        let args = [LogValue::from("alice"), LogValue::from("10.0.0.1")];
        let entry = build_simple(
            "auth",
            "user %s failed login from %s",
            &args,
            Severity::Warning,
            "",
        )
        .unwrap();

        let display = resolve(&row_from(entry)).unwrap();
        assert_eq!(
            display.formatted_message,
            "user alice failed login from 10.0.0.1"
        );
        assert_eq!(display.severity, Severity::Warning);
        assert_eq!(display.class_token.as_deref(), Some("fl--log--type-auth"));
        assert_eq!(display.created_at, 1_700_000_000);
    }

    #[test]
    fn test_resolve_reports_mismatch() {
        let entry = build_simple(
            "auth",
            "%s and %s",
            &[LogValue::from("one")],
            Severity::Notice,
            "",
        )
        .unwrap();

        let err = resolve(&row_from(entry)).unwrap_err();
        assert_eq!(
            err,
            CodecError::TemplateArgMismatch {
                placeholders: 2,
                arguments: 1
            }
        );
    }

    #[test]
    fn test_resolve_rejects_corrupt_severity() {
        let mut row = row_from(build_simple("c", "x", &[], Severity::Info, "").unwrap());
        row.severity = 2;
        assert!(matches!(
            resolve(&row),
            Err(CodecError::InvalidSeverity(_))
        ));
    }

    #[test]
    fn test_class_token() {
        assert_eq!(class_token(""), None);
        assert_eq!(
            class_token("My Plugin/v2").as_deref(),
            Some("fl--log--type-my-plugin-v2")
        );
        assert_eq!(
            class_token("flow_log-core").as_deref(),
            Some("fl--log--type-flow_log-core")
        );
    }

    #[test]
    fn test_resolve_rejects_oversized_precision() {
        let entry = build_simple(
            "metrics",
            "load %.100000f",
            &[LogValue::from(2.0)],
            Severity::Info,
            "",
        )
        .unwrap();

        let err = resolve(&row_from(entry)).unwrap_err();
        assert!(matches!(err, CodecError::PrecisionOutOfRange { .. }));
    }
}
