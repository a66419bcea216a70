//! Conversion Models
//!
//! Optional second pass over parsed messages that maps raw LWCP property
//! names onto friendlier ones.

pub mod builtin;
pub mod convert;
pub mod schema;

pub use convert::{convert, label_rows};
pub use schema::{ConversionModel, ConversionRule};
