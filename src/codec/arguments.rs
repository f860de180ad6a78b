//! Self-describing encoding for message arguments.
//!
//! Arguments are stored as a versioned JSON envelope so that any reader can
//! decode them without knowing what wrote them:
//!
//! ```json
//! {"version":1,"values":[{"type":"str","value":"alice"},{"type":"int","value":3}]}
//! ```

use serde::{Deserialize, Serialize};

use super::CodecError;

/// Current envelope version written by [`encode`].
pub const ENCODING_VERSION: u32 = 1;

/// A scalar argument for a message template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl LogValue {
    /// Text form used by `%s`.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    /// Integer form used by `%d`.
    ///
    /// Floats truncate toward zero; strings contribute their leading integer
    /// (`"42abc"` is 42, `"abc"` is 0).
    #[must_use]
    pub fn to_integer(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(b) => i64::from(*b),
            Self::Int(i) => *i,
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => f.trunc() as i64,
            Self::Str(s) => leading_integer(s),
        }
    }

    /// Float form used by `%f`.
    #[must_use]
    pub fn to_float(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
            Self::Str(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i + sign_len);

    s[..digits].parse().unwrap_or(0)
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for LogValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for LogValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for LogValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    values: &'a [LogValue],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    values: Vec<LogValue>,
}

/// Encodes arguments into the storage envelope.
///
/// # Errors
///
/// Returns [`CodecError::MalformedArguments`] for non-finite floats, which
/// JSON cannot represent.
pub fn encode(values: &[LogValue]) -> Result<String, CodecError> {
    if let Some(LogValue::Float(f)) = values
        .iter()
        .find(|v| matches!(v, LogValue::Float(f) if !f.is_finite()))
    {
        return Err(CodecError::MalformedArguments(format!(
            "non-finite float argument: {f}"
        )));
    }

    serde_json::to_string(&EnvelopeRef {
        version: ENCODING_VERSION,
        values,
    })
    .map_err(|e| CodecError::MalformedArguments(e.to_string()))
}

/// Decodes a stored envelope back into arguments.
///
/// An empty column decodes to no arguments.
///
/// # Errors
///
/// Returns [`CodecError::MalformedArguments`] for invalid JSON and
/// [`CodecError::UnsupportedEncoding`] for an unknown envelope version.
pub fn decode(encoded: &str) -> Result<Vec<LogValue>, CodecError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    let envelope: Envelope = serde_json::from_str(encoded)
        .map_err(|e| CodecError::MalformedArguments(e.to_string()))?;

    if envelope.version != ENCODING_VERSION {
        return Err(CodecError::UnsupportedEncoding(envelope.version));
    }

    Ok(envelope.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_tagged_and_versioned() {
        let encoded = encode(&[LogValue::from("alice"), LogValue::from(3_i64)]).unwrap();
        assert_eq!(
            encoded,
            r#"{"version":1,"values":[{"type":"str","value":"alice"},{"type":"int","value":3}]}"#
        );
    }

    #[test]
    fn test_decode_preserves_order_and_types() {
        let values = vec![
            LogValue::from("b"),
            LogValue::from(1.5),
            LogValue::from(true),
            LogValue::Null,
            LogValue::from("a"),
        ];
        let decoded = decode(&encode(&values).unwrap()).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_decode_empty_column() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode(r#"{"version":1,"values":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let err = decode(r#"{"version":9,"values":[]}"#).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedEncoding(9)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("a:2:{i:0;s:5:\"alice\";}").unwrap_err();
        assert!(matches!(err, CodecError::MalformedArguments(_)));
    }

    #[test]
    fn test_encode_rejects_nan() {
        assert!(encode(&[LogValue::Float(f64::NAN)]).is_err());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(LogValue::from("42abc").to_integer(), 42);
        assert_eq!(LogValue::from(" -7 ").to_integer(), -7);
        assert_eq!(LogValue::from("abc").to_integer(), 0);
        assert_eq!(LogValue::from(3.9).to_integer(), 3);
        assert_eq!(LogValue::from(true).to_integer(), 1);
        assert_eq!(LogValue::Null.to_integer(), 0);
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(LogValue::from(None::<i64>), LogValue::Null);
        assert_eq!(LogValue::from(Some("x")), LogValue::from("x"));
    }
}
