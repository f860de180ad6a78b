use serde::Serialize;

use crate::codec::arguments::LogValue;
use crate::models::severity::{RawSeverity, Severity};

pub use crate::entities::flow_log::Model as LogEntry;

/// A validated entry ready to be persisted.
///
/// Produced by [`crate::codec::build`]. `id` and `created_at` are deliberately
/// absent; the store assigns both on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub actor_id: i64,
    pub subject_id: i64,
    pub category: String,
    pub message: String,
    pub variables: String,
    pub severity: Severity,
    pub link: String,
    pub location: String,
    pub referer: String,
}

/// A stored entry with its message interpolated, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    pub id: i64,
    pub formatted_message: String,
    pub category: String,
    /// `fl--log--type-<category>`, present only when the category is non-empty.
    pub class_token: Option<String>,
    pub severity: Severity,
    pub link: String,
    pub created_at: i64,
}

/// Filters reserved for [`crate::db::Store::query_logs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub severity: Option<Severity>,
    pub category: Option<String>,
    /// Inclusive lower bound on `created_at` (unix seconds).
    pub since: Option<i64>,
    /// Inclusive upper bound on `created_at` (unix seconds).
    pub until: Option<i64>,
}

/// What a caller wants logged. Request context is filled in separately.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRequest {
    pub category: String,
    pub message: String,
    pub arguments: Vec<LogValue>,
    pub subject_id: i64,
    pub severity: RawSeverity,
    pub link: String,
}

impl LogRequest {
    /// Starts a request with no arguments, no subject, NOTICE severity and no link.
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            arguments: Vec::new(),
            subject_id: 0,
            severity: RawSeverity::default(),
            link: String::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<LogValue>) -> Self {
        self.arguments.push(value.into());
        self
    }

    #[must_use]
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.arguments.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn subject(mut self, subject_id: i64) -> Self {
        self.subject_id = subject_id;
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: impl Into<RawSeverity>) -> Self {
        self.severity = severity.into();
        self
    }

    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}
