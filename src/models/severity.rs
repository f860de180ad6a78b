use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// Log message severity, using the RFC 3164 numeric codes.
///
/// Lower codes are more severe. Only the four levels below are valid; anything
/// else is rejected at the boundary with [`CodecError::InvalidSeverity`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Severity {
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant conditions.
    #[default]
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Warning, Self::Notice, Self::Info, Self::Debug];

    #[must_use]
    pub const fn code(self) -> i16 {
        self as i16
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Looks up a level by its numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSeverity`] for codes outside 4..=7.
    pub fn from_code(code: i64) -> Result<Self, CodecError> {
        match code {
            4 => Ok(Self::Warning),
            5 => Ok(Self::Notice),
            6 => Ok(Self::Info),
            7 => Ok(Self::Debug),
            other => Err(CodecError::InvalidSeverity(other.to_string())),
        }
    }

    /// Looks up a level by name.
    ///
    /// Matching is case-insensitive and tolerates a `FLOWLOG_` prefix, so
    /// `"warning"`, `"Warning"` and `"FLOWLOG_WARNING"` all resolve.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSeverity`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        let trimmed = name.trim();
        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("FLOWLOG_").unwrap_or(&upper);

        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(bare))
            .ok_or_else(|| CodecError::InvalidSeverity(trimmed.to_string()))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<i64> for Severity {
    type Error = CodecError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// A severity as supplied by a caller, before validation.
///
/// Callers holding a [`Severity`] can never fail; codes and names coming from
/// configuration or untyped input are checked when the entry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSeverity {
    Level(Severity),
    Code(i64),
    Name(String),
}

impl RawSeverity {
    /// Resolves the raw value into one of the four defined levels.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSeverity`] if the code or name is unknown.
    pub fn resolve(&self) -> Result<Severity, CodecError> {
        match self {
            Self::Level(level) => Ok(*level),
            Self::Code(code) => Severity::from_code(*code),
            Self::Name(name) => Severity::from_name(name),
        }
    }
}

impl Default for RawSeverity {
    fn default() -> Self {
        Self::Level(Severity::default())
    }
}

impl From<Severity> for RawSeverity {
    fn from(level: Severity) -> Self {
        Self::Level(level)
    }
}

impl From<i64> for RawSeverity {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<i32> for RawSeverity {
    fn from(code: i32) -> Self {
        Self::Code(i64::from(code))
    }
}

impl From<&str> for RawSeverity {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RawSeverity {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
