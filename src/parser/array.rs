//! Array literals
//!
//! Recursive-descent parser for bracketed property values such as
//! `[[IDLE, IDLE, "Main-Studio", "10", NULL, 0, NULL, "", NONE]]`.
//!
//! Accepted elements: nested arrays, JSON strings, JSON numbers, the keywords
//! `true`/`false`/`null` in any case, and bareword enumerations
//! (`[A-Z]+(_[A-Z]+)*`) which become strings.

use crate::parser::value::Value;

/// Deepest array nesting accepted, matching serde_json's recursion limit
pub const MAX_DEPTH: usize = 128;

/// Why an array literal was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("invalid token `{0}`")]
    InvalidToken(String),
    #[error("invalid string literal at offset {0}")]
    InvalidString(usize),
    #[error("trailing characters at offset {0}")]
    Trailing(usize),
    #[error("arrays nested deeper than {MAX_DEPTH} levels at offset {0}")]
    TooDeep(usize),
}

/// Parse a complete `[...]` literal
pub fn parse_array(literal: &str) -> Result<Vec<Value>, ArrayError> {
    let mut parser = ArrayParser::new(literal);
    parser.skip_whitespace();
    let items = parser.parse_array()?;
    parser.skip_whitespace();

    if parser.pos != literal.len() {
        return Err(ArrayError::Trailing(parser.pos));
    }
    Ok(items)
}

struct ArrayParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> ArrayParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), ArrayError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(ArrayError::Unexpected {
                found,
                offset: self.pos,
            }),
            None => Err(ArrayError::UnexpectedEnd),
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Value>, ArrayError> {
        if self.depth == MAX_DEPTH {
            return Err(ArrayError::TooDeep(self.pos));
        }
        self.depth += 1;
        let items = self.parse_elements();
        self.depth -= 1;
        items
    }

    fn parse_elements(&mut self) -> Result<Vec<Value>, ArrayError> {
        self.expect('[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(items);
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(found) => {
                    return Err(ArrayError::Unexpected {
                        found,
                        offset: self.pos,
                    });
                }
                None => return Err(ArrayError::UnexpectedEnd),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ArrayError> {
        self.skip_whitespace();

        match self.peek() {
            Some('[') => self.parse_array().map(Value::Array),
            Some('"') => self.parse_string(),
            Some(_) => self.parse_token(),
            None => Err(ArrayError::UnexpectedEnd),
        }
    }

    /// JSON string literal; escapes are decoded
    fn parse_string(&mut self) -> Result<Value, ArrayError> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut i = start + 1;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' => {
                    let literal = &self.src[start..=i];
                    self.pos = i + 1;
                    return serde_json::from_str::<String>(literal)
                        .map(Value::String)
                        .map_err(|_| ArrayError::InvalidString(start));
                }
                _ => i += 1,
            }
        }

        Err(ArrayError::UnexpectedEnd)
    }

    /// Keyword, bareword enumeration or number
    fn parse_token(&mut self) -> Result<Value, ArrayError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | ']' | '[' | '"') {
                break;
            }
            self.pos += c.len_utf8();
        }

        let token = &self.src[start..self.pos];
        if token.is_empty() {
            // Only reachable on a stray delimiter, e.g. `[,1]`
            return match self.peek() {
                Some(found) => Err(ArrayError::Unexpected {
                    found,
                    offset: start,
                }),
                None => Err(ArrayError::UnexpectedEnd),
            };
        }

        if token.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if token.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else if token.eq_ignore_ascii_case("null") {
            Ok(Value::Null)
        } else if is_enumeration(token) {
            Ok(Value::String(token.to_string()))
        } else {
            serde_json::from_str::<f64>(token)
                .map(Value::Number)
                .map_err(|_| ArrayError::InvalidToken(token.to_string()))
        }
    }
}

/// `IDLE`, `NONE`, `ON_HOLD`; no digits, no leading/trailing/double underscore
pub fn is_enumeration(token: &str) -> bool {
    !token.is_empty()
        && token
            .split('_')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::String(text.to_string())
    }

    #[test]
    fn test_flat_string_array() {
        let items = parse_array(r#"["Fixed 1", "Fixed 2"]"#).unwrap();
        assert_eq!(items, vec![s("Fixed 1"), s("Fixed 2")]);
    }

    #[test]
    fn test_line_list_row() {
        let items =
            parse_array(r#"[[IDLE, IDLE, "Main-Studio", "10", NULL, 0, NULL, "", NONE]]"#)
                .unwrap();
        assert_eq!(
            items,
            vec![Value::Array(vec![
                s("IDLE"),
                s("IDLE"),
                s("Main-Studio"),
                s("10"),
                Value::Null,
                Value::Number(0.0),
                Value::Null,
                s(""),
                s("NONE"),
            ])]
        );
    }

    #[test]
    fn test_keywords_any_case() {
        let items = parse_array("[TRUE, False, null, NULL]").unwrap();
        assert_eq!(
            items,
            vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
                Value::Null
            ]
        );
    }

    #[test]
    fn test_underscore_enumerations_and_nesting() {
        let items = parse_array("[[ON_HOLD, [RINGING]], []]").unwrap();
        assert_eq!(
            items,
            vec![
                Value::Array(vec![s("ON_HOLD"), Value::Array(vec![s("RINGING")])]),
                Value::Array(vec![]),
            ]
        );
    }

    #[test]
    fn test_keyword_inside_string_is_untouched() {
        let items = parse_array(r#"["True North", NULLABLE]"#).unwrap();
        assert_eq!(items, vec![s("True North"), s("NULLABLE")]);
    }

    #[test]
    fn test_string_escapes_are_decoded() {
        let items = parse_array(r#"["say \"hi\""]"#).unwrap();
        assert_eq!(items, vec![s("say \"hi\"")]);
    }

    #[test]
    fn test_numbers() {
        let items = parse_array("[1, -2.5, 1e3]").unwrap();
        assert_eq!(
            items,
            vec![
                Value::Number(1.0),
                Value::Number(-2.5),
                Value::Number(1000.0)
            ]
        );
    }

    #[test]
    fn test_rejects_lowercase_bareword() {
        assert_eq!(
            parse_array("[idle]"),
            Err(ArrayError::InvalidToken("idle".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_structure() {
        assert!(parse_array("[1,]").is_err());
        assert!(parse_array("[1 2]").is_err());
        assert!(parse_array("[\"open]").is_err());
        assert!(parse_array("[1]]").is_err());
        assert!(parse_array("[{}]").is_err());
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let literal = format!("{}1{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        let mut value = Value::Array(parse_array(&literal).unwrap());
        for _ in 1..MAX_DEPTH {
            value = match value {
                Value::Array(mut items) => items.remove(0),
                other => panic!("expected array, got {:?}", other),
            };
        }
        assert_eq!(value, Value::Array(vec![Value::Number(1.0)]));
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let literal = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(parse_array(&literal), Err(ArrayError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_very_deep_nesting_does_not_overflow() {
        let literal = format!("{}{}", "[".repeat(200_000), "]".repeat(200_000));
        assert!(matches!(parse_array(&literal), Err(ArrayError::TooDeep(_))));
    }

    #[test]
    fn test_is_enumeration() {
        assert!(is_enumeration("IDLE"));
        assert!(is_enumeration("ON_HOLD"));
        assert!(!is_enumeration("LINE1"));
        assert!(!is_enumeration("_IDLE"));
        assert!(!is_enumeration("ON__HOLD"));
        assert!(!is_enumeration("Idle"));
    }
}
