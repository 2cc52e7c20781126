//! Fault types for the XML codec.
//!
//! Two distinct fault kinds live here, matching the two boundary
//! directions:
//! - [`ParseError`]: the record could not be built from the wire form.
//! - [`WriteError`]: the record could not be serialised, most commonly
//!   because a mandatory field was never set.
//!
//! Constraint violations detected while a record is being mutated are a
//! third kind, [`healthbook_types::ValidationError`]; during parsing those
//! surface wrapped in [`ParseError::Constraint`] so the caller still sees
//! which element was at fault.

use healthbook_types::ValidationError;

/// Errors raised while populating a record from an XML fragment.
///
/// Every variant that concerns a particular field names both the element
/// and the enclosing element, so a caller can report faults without
/// re-walking the document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A structurally required child element was absent.
    #[error("missing required element <{element}> inside <{parent}>")]
    MissingElement { parent: String, element: String },

    /// A present element's text failed to convert to its declared scalar
    /// type. Never raised for simple absence.
    #[error("element <{element}> inside <{parent}> does not contain a valid {expected}: '{text}'")]
    Malformed {
        parent: String,
        element: String,
        expected: &'static str,
        text: String,
    },

    /// A converted value violated the field's constraint.
    #[error("element <{element}> inside <{parent}> is invalid: {source}")]
    Constraint {
        parent: String,
        element: String,
        source: ValidationError,
    },

    /// The fragment's root element was not the one the record expects.
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    /// The document ended before any root element appeared.
    #[error("document contains no root element")]
    NoRootElement,

    /// The underlying XML was not well formed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be decoded.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}

/// Errors raised while serialising a record to XML.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A mandatory field was never set on the record being written.
    #[error("mandatory field '{field}' of <{record}> was never set")]
    UnsetField {
        record: &'static str,
        field: &'static str,
    },

    /// A collection that must hold at least one entry was empty at write
    /// time.
    #[error("mandatory collection '{field}' of <{record}> is empty")]
    EmptyCollection {
        record: &'static str,
        field: &'static str,
    },

    /// `end` was called with no element open.
    #[error("end was called with no element open")]
    Unbalanced,

    /// The underlying writer failed.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The serialised buffer was not valid UTF-8.
    #[error("serialised XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
