//! Parse failures

/// Why a message could not be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The text does not have the `operation object[.sub[#id]]` shape
    #[error("not an LWCP message")]
    NotLwcp,
    /// The envelope matched but the property list is malformed
    #[error("INVALID SYNTAX: {0}")]
    Syntax(#[from] SyntaxError),
}

/// A malformed property inside the property list
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{fault} in property \"{property}\"")]
pub struct SyntaxError {
    /// Name of the offending property
    pub property: String,
    pub fault: SyntaxFault,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxFault {
    #[error("missing closing quotation")]
    UnterminatedString,
    #[error("missing closing bracket")]
    UnterminatedArray,
    #[error("unable to parse array ({0})")]
    InvalidArray(String),
}

impl SyntaxError {
    pub fn new(property: &str, fault: SyntaxFault) -> Self {
        Self {
            property: property.to_string(),
            fault,
        }
    }
}
