//! LWCP Parser
//!
//! Two steps: the envelope (`operation object[.sub[#id]]`) is matched as a
//! whole, then the property tail is scanned into typed values.

pub mod array;
pub mod envelope;
pub mod error;
pub mod scanner;
pub mod value;

pub use envelope::Envelope;
pub use error::{ParseError, SyntaxError, SyntaxFault};
pub use scanner::{Entry, parse_properties};
pub use value::{PropertyMap, Value};

use serde::Serialize;

/// A parsed LWCP message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Operation, e.g. `indi`, `get`, `set`
    pub operation: String,
    /// Target object, e.g. `studio`
    pub object: String,
    pub sub_object: Option<String>,
    /// Numeric sub-object id, kept as written
    pub sub_object_id: Option<String>,
    /// `None` when the message carried no property list
    pub properties: Option<PropertyMap>,
}

impl Message {
    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name)
    }
}

/// Parse one message, reporting why it failed
pub fn try_parse(raw: &str) -> Result<Message, ParseError> {
    let line = envelope::flatten(raw);
    let env = envelope::match_envelope(&line).ok_or(ParseError::NotLwcp)?;

    let properties = env.tail.map(scanner::parse_properties).transpose()?;

    Ok(Message {
        operation: env.operation.to_string(),
        object: env.object.to_string(),
        sub_object: env.sub_object.map(str::to_string),
        sub_object_id: env.sub_object_id.map(str::to_string),
        properties,
    })
}

/// Parse one message
///
/// Returns `None` when the text is not an LWCP message or its property list is
/// malformed; syntax errors are logged at `warn`. With `auto_convert` the
/// built-in conversion model is applied before returning.
pub fn parse(raw: &str, auto_convert: bool) -> Option<Message> {
    let message = match try_parse(raw) {
        Ok(message) => message,
        Err(ParseError::NotLwcp) => {
            log::debug!("Ignoring non-LWCP input: {:?}", raw);
            return None;
        }
        Err(e) => {
            log::warn!("{}", e);
            return None;
        }
    };

    if auto_convert {
        Some(crate::model::convert(&message, &crate::model::ConversionModel::default()))
    } else {
        Some(message)
    }
}
