//! Document Decoder
//!
//! Decodes a multi-line capture of LWCP traffic one line at a time, keeping
//! the successfully parsed messages and a diagnostic for every line that
//! failed.

use crate::model::{ConversionModel, convert};
use crate::parser::{Message, ParseError, try_parse};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    /// Envelope matched but the property list is malformed
    Error,
    /// Line is not an LWCP message at all
    Warning,
}

/// A problem found on one line
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    pub message: String,
    pub severity: Severity,
}

/// A message together with the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLine {
    pub line: usize,
    pub message: Message,
}

/// How lines are decoded
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Apply the conversion pass to every decoded message
    pub convert: bool,
    /// Layered over the built-in model when converting
    pub overrides: ConversionModel,
}

/// Result of decoding a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub messages: Vec<DecodedLine>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            message,
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            message,
            severity: Severity::Warning,
        });
    }

    /// No line had a malformed property list
    pub fn is_clean(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}

/// Decode a single line
pub fn decode_line(
    line_num: usize,
    line: &str,
    options: &DecodeOptions,
    report: &mut DecodeReport,
) {
    match try_parse(line) {
        Ok(message) => {
            let message = if options.convert {
                convert(&message, &options.overrides)
            } else {
                message
            };
            report.messages.push(DecodedLine {
                line: line_num,
                message,
            });
        }
        Err(ParseError::NotLwcp) => {
            report.add_warning(line_num, ParseError::NotLwcp.to_string());
        }
        Err(e) => {
            log::warn!("line {}: {}", line_num, e);
            report.add_error(line_num, e.to_string());
        }
    }
}

/// Decode every non-blank line of `content`
pub fn decode_document(content: &str, options: &DecodeOptions) -> DecodeReport {
    let mut report = DecodeReport::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        decode_line(line_num + 1, line, options, &mut report);
    }

    log::debug!(
        "decoded {} messages, {} diagnostics",
        report.messages.len(),
        report.diagnostics.len()
    );

    report
}
