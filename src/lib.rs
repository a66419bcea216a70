//! LWCP Parser
//!
//! Parsing and normalisation of LWCP, the line-based control protocol spoken
//! between broadcast-studio phone systems and their clients.
//!
//! This library provides:
//! - Envelope and property-list parsing into typed values
//! - Model-driven renaming of raw property names
//! - Line-by-line decoding of captures with diagnostics
//! - Configuration for the `lwcp-decode` tool

pub mod cli;
pub mod config;
pub mod decoder;
pub mod model;
pub mod parser;

// Re-exports for clean public API
pub use config::Config;
pub use decoder::{DecodeReport, Diagnostic, decode_document};
pub use model::{ConversionModel, ConversionRule, convert};
pub use parser::{Message, ParseError, Value, parse, try_parse};
