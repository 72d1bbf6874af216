// Normalization errors - the single failure type raised by every report parser

use thiserror::Error;

/// Failure to turn a raw report into a `SuiteResult`.
///
/// Parsers never return a partially built tree: any of these aborts the whole
/// parse call.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The document is not well-formed XML (truncated, bad encoding, ...)
    #[error("report is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document root does not belong to the dialect the parser handles
    #[error("unexpected document root <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    /// A namespace prefix the dialect depends on is not declared
    #[error("namespace prefix '{0}' is not declared in the report")]
    UndeclaredNamespace(String),

    #[error("missing required element <{element}> in <{parent}>")]
    MissingElement { element: String, parent: String },

    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("invalid value {value:?} for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// More duplicate test case names than the probe bound allows
    #[error("could not find a unique name for test case '{name}' after {attempts} tries")]
    NameCollision { name: String, attempts: usize },
}

impl NormalizeError {
    pub(crate) fn missing_element(element: &str, parent: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
            parent: parent.to_string(),
        }
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code used by the `check` command
    pub fn code(&self) -> &'static str {
        match self {
            Self::Xml(_) => "MALFORMED_XML",
            Self::UnexpectedRoot { .. } => "UNEXPECTED_DIALECT",
            Self::UndeclaredNamespace(_) => "UNDECLARED_NAMESPACE",
            Self::MissingElement { .. } => "MISSING_ELEMENT",
            Self::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::NameCollision { .. } => "NAME_COLLISION",
        }
    }
}
