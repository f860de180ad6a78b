//! printf-style interpolation of message templates.
//!
//! Supported conversions are `%s`, `%d`, `%f` (optionally `%.Nf`) and the
//! literal `%%`. A conversion may name its argument explicitly with `%N$`,
//! e.g. `%2$s`. Any other `%` sequence is copied through unchanged.

use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

use super::CodecError;
use super::arguments::LogValue;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest precision accepted in `%.Nf` / `%.Ns`.
pub const MAX_PRECISION: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Str,
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    /// Zero-based argument index.
    index: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(Placeholder),
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%(?:(%)|(?:([1-9][0-9]*)\$)?(?:\.([0-9]+))?([sdf]))")
            .expect("Invalid regex")
    })
}

/// Splits a template into literal text and placeholders, returning the
/// number of arguments the template consumes.
fn parse(template: &str) -> Result<(Vec<Segment<'_>>, usize), CodecError> {
    let mut segments = Vec::new();
    let mut last = 0;
    let mut next_sequential = 0;
    let mut required = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > last {
            segments.push(Segment::Literal(&template[last..whole.start()]));
        }
        last = whole.end();

        if caps.get(1).is_some() {
            segments.push(Segment::Literal("%"));
            continue;
        }

        let index = if let Some(position) = caps.get(2) {
            // Regex guarantees a non-zero decimal; overflow is the only failure.
            match position.as_str().parse::<usize>() {
                Ok(n) => n - 1,
                Err(_) => usize::MAX - 1,
            }
        } else {
            next_sequential += 1;
            next_sequential - 1
        };
        required = required.max(index.saturating_add(1));

        let precision = match caps.get(3) {
            Some(p) => {
                let digits = p.as_str();
                match digits.parse::<usize>() {
                    Ok(n) if n <= MAX_PRECISION => Some(n),
                    _ => {
                        return Err(CodecError::PrecisionOutOfRange {
                            precision: digits.to_string(),
                            max: MAX_PRECISION,
                        });
                    }
                }
            }
            None => None,
        };
        let conversion = match caps.get(4).map(|c| c.as_str()) {
            Some("d") => Conversion::Int,
            Some("f") => Conversion::Float,
            _ => Conversion::Str,
        };

        segments.push(Segment::Placeholder(Placeholder {
            index,
            precision,
            conversion,
        }));
    }

    if last < template.len() {
        segments.push(Segment::Literal(&template[last..]));
    }

    Ok((segments, required))
}

/// Number of arguments `template` expects.
///
/// # Errors
///
/// Returns [`CodecError::PrecisionOutOfRange`] for a precision above
/// [`MAX_PRECISION`].
pub fn placeholder_count(template: &str) -> Result<usize, CodecError> {
    parse(template).map(|(_, required)| required)
}

/// Substitutes `args` into `template`.
///
/// # Errors
///
/// Returns [`CodecError::TemplateArgMismatch`] when the number of arguments
/// the template consumes differs from `args.len()`, and
/// [`CodecError::PrecisionOutOfRange`] for a precision above [`MAX_PRECISION`].
pub fn format(template: &str, args: &[LogValue]) -> Result<String, CodecError> {
    let (segments, required) = parse(template)?;

    if required != args.len() {
        return Err(CodecError::TemplateArgMismatch {
            placeholders: required,
            arguments: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(p) => {
                let Some(value) = args.get(p.index) else {
                    return Err(CodecError::TemplateArgMismatch {
                        placeholders: required,
                        arguments: args.len(),
                    });
                };
                render_value(&mut out, value, p);
            }
        }
    }

    Ok(out)
}

fn render_value(out: &mut String, value: &LogValue, p: Placeholder) {
    match p.conversion {
        Conversion::Str => {
            let text = value.to_display_string();
            match p.precision {
                Some(max) => out.extend(text.chars().take(max)),
                None => out.push_str(&text),
            }
        }
        Conversion::Int => {
            let _ = write!(out, "{}", value.to_integer());
        }
        Conversion::Float => {
            let precision = p.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            let _ = write!(out, "{:.*}", precision, value.to_float());
        }
    }
}
