//! Property list scanner
//!
//! Walks the property tail of a message (`id=1, name="Studio", mute`) left to
//! right. Each step looks for the earliest of `=`, whitespace or `,`:
//! anything but `=` ends a bare flag, `=` introduces a value whose first
//! character selects string, array or scalar scanning.

use crate::parser::array::parse_array;
use crate::parser::error::{SyntaxError, SyntaxFault};
use crate::parser::value::{PropertyMap, Value};

/// One scanned item of the property list, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A name without `=value`
    Flag(String),
    /// `name=value`
    Property(String, Value),
}

/// Kinds of property separators, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterKind {
    Equals,
    Whitespace,
    Comma,
}

/// Location of the next delimiter in a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub kind: DelimiterKind,
    /// Byte offset of the delimiter
    pub at: usize,
    /// Byte length of the delimiter character
    pub len: usize,
}

/// Find the earliest `=`, whitespace or `,` in `text`
///
/// Candidates at the same offset resolve as `=` before whitespace before `,`.
pub fn next_delimiter(text: &str) -> Option<Delimiter> {
    let candidates = [
        text.find('=').map(|at| (DelimiterKind::Equals, at)),
        text.find(char::is_whitespace)
            .map(|at| (DelimiterKind::Whitespace, at)),
        text.find(',').map(|at| (DelimiterKind::Comma, at)),
    ];

    let mut best: Option<(DelimiterKind, usize)> = None;
    for (kind, at) in candidates.into_iter().flatten() {
        if best.is_none_or(|(_, best_at)| at < best_at) {
            best = Some((kind, at));
        }
    }

    best.map(|(kind, at)| Delimiter {
        kind,
        at,
        len: text[at..].chars().next().map_or(1, char::len_utf8),
    })
}

/// Drop one leading comma, then surrounding whitespace
fn trim_separator(text: &str) -> &str {
    text.strip_prefix(',').unwrap_or(text).trim()
}

/// Scan a whole property tail into entries
///
/// Doubled or trailing separators (`a=1 , b`, `a=1, `) would yield a bare
/// flag with an empty name; those are skipped rather than recorded as
/// `"" -> true`.
pub fn scan_properties(tail: &str) -> Result<Vec<Entry>, SyntaxError> {
    let mut entries = Vec::new();
    let mut rest = tail;

    while !rest.is_empty() {
        rest = trim_separator(rest);
        if rest.is_empty() {
            break;
        }

        let (entry, remaining) = next_entry(rest)?;
        match entry {
            // Empty names only come from doubled or trailing separators
            Entry::Flag(ref name) if name.is_empty() => {}
            entry => {
                log::trace!("scanned {:?}", entry);
                entries.push(entry);
            }
        }
        rest = remaining;
    }

    Ok(entries)
}

/// Fold entries into a map; flags become `true` and later names win
pub fn fold_entries(entries: Vec<Entry>) -> PropertyMap {
    let mut props = PropertyMap::new();
    for entry in entries {
        match entry {
            Entry::Flag(name) => {
                props.insert(name, Value::Bool(true));
            }
            Entry::Property(name, value) => {
                props.insert(name, value);
            }
        }
    }
    props
}

/// Scan and fold in one step
pub fn parse_properties(tail: &str) -> Result<PropertyMap, SyntaxError> {
    scan_properties(tail).map(fold_entries)
}

/// Scan one entry from the front of `text`, returning it and the unscanned rest
fn next_entry(text: &str) -> Result<(Entry, &str), SyntaxError> {
    let Some(delim) = next_delimiter(text) else {
        return Ok((Entry::Flag(text.to_string()), ""));
    };

    let name = &text[..delim.at];
    let after = &text[delim.at + delim.len..];

    if delim.kind != DelimiterKind::Equals {
        return Ok((Entry::Flag(name.to_string()), after));
    }

    let value_text = trim_separator(after);
    let (value, rest) = match value_text.as_bytes().first() {
        Some(b'"') => scan_string(name, value_text)?,
        Some(b'[') => scan_array(name, value_text)?,
        _ => scan_scalar(value_text),
    };

    Ok((Entry::Property(name.to_string(), value), rest))
}

/// `"..."` up to the next quote, taken verbatim
fn scan_string<'a>(name: &str, text: &'a str) -> Result<(Value, &'a str), SyntaxError> {
    let body = &text[1..];
    let end = body
        .find('"')
        .ok_or_else(|| SyntaxError::new(name, SyntaxFault::UnterminatedString))?;

    Ok((Value::String(body[..end].to_string()), &body[end + 1..]))
}

/// `[...]` up to the matching close bracket
fn scan_array<'a>(name: &str, text: &'a str) -> Result<(Value, &'a str), SyntaxError> {
    let close = find_array_close(text)
        .ok_or_else(|| SyntaxError::new(name, SyntaxFault::UnterminatedArray))?;

    let items = parse_array(&text[..=close])
        .map_err(|e| SyntaxError::new(name, SyntaxFault::InvalidArray(e.to_string())))?;

    Ok((Value::Array(items), &text[close + 1..]))
}

/// Byte offset of the bracket closing the one at offset 0
///
/// Brackets are counted without regard to quoting.
fn find_array_close(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.bytes().enumerate().skip(1) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Unquoted value up to the next delimiter, which stays in the rest
fn scan_scalar(text: &str) -> (Value, &str) {
    match next_delimiter(text) {
        Some(delim) => (classify_scalar(&text[..delim.at]), &text[delim.at..]),
        None => (classify_scalar(text), ""),
    }
}

/// Keyword, number or literal string (bareword enumerations land here)
pub fn classify_scalar(token: &str) -> Value {
    if token.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if token.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if token.eq_ignore_ascii_case("null") {
        Value::Null
    } else {
        parse_number_prefix(token)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(token.to_string()))
    }
}

/// Longest leading decimal literal of `token`, if any
///
/// `"12"` and `"12abc"` both yield 12; `"-Infinity"` is accepted; `"abc"` and
/// `"."` yield nothing.
pub fn parse_number_prefix(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let mut end = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if token[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    token[..end].parse().ok()
}
