//! Message envelope
//!
//! Splits `operation object[.subobject[#id]] [properties]` into its parts.
//! The property tail is returned unparsed.

use regex::Regex;
use std::sync::LazyLock;

static ENVELOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-z]+(?:_[a-z]+)*)\s+([a-z]+(?:_[a-z]+)*)(?:\.([a-z]+(?:_[a-z]+)*)(?:#([0-9]+))?)?(?:\s+(.*))?$",
    )
    .expect("envelope pattern is valid")
});

/// The envelope of one message, borrowed from the flattened input
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<'a> {
    pub operation: &'a str,
    pub object: &'a str,
    pub sub_object: Option<&'a str>,
    pub sub_object_id: Option<&'a str>,
    /// Everything after the object token; `None` when empty
    pub tail: Option<&'a str>,
}

/// Remove every `\n` and `\r` so multi-line input matches as one line
pub fn flatten(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

/// Match a flattened line against the envelope grammar
pub fn match_envelope(line: &str) -> Option<Envelope<'_>> {
    let caps = ENVELOPE.captures(line)?;

    Some(Envelope {
        operation: caps.get(1)?.as_str(),
        object: caps.get(2)?.as_str(),
        sub_object: caps.get(3).map(|m| m.as_str()),
        sub_object_id: caps.get(4).map(|m| m.as_str()),
        tail: caps.get(5).map(|m| m.as_str()).filter(|t| !t.is_empty()),
    })
}
