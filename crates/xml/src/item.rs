//! The shared record capability trait.
//!
//! Every item type implements [`XmlItem`]: a fixed root element name, a
//! parse from an [`XmlNode`], and a write to an [`XmlWriter`] under a
//! caller-chosen element name. The explicit name parameter exists because
//! composition reuses types under field-specific names (a family-history
//! condition is `family-history-condition` standalone but `condition`
//! inside `family-history`).
//!
//! Mandatory-field enforcement at write time goes through [`required`]
//! and [`required_slice`], which turn unset state into a fault naming the
//! record and field.

use healthbook_types::check;

use crate::document::XmlNode;
use crate::error::{ParseError, WriteError};
use crate::writer::XmlWriter;

/// A record with a fixed XML shape.
pub trait XmlItem: Sized {
    /// The canonical root element name for this record.
    const ELEMENT: &'static str;

    /// Populates a record from its element node.
    ///
    /// Fields are read in the record's documented schema order. Optional
    /// fields decode to `None` when their element is missing; constrained
    /// values route through the validating constructors.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if a required element is missing, a
    /// scalar is malformed, or a value violates a field constraint.
    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError>;

    /// Serialises the record under the given element name.
    ///
    /// Fields are written in the same order they are parsed; this
    /// ordering is part of the wire contract. Unset optional fields are
    /// omitted entirely.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::UnsetField`] or
    /// [`WriteError::EmptyCollection`] if a mandatory field is unset, or
    /// [`WriteError::Xml`] if emission fails.
    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError>;

    /// Locates this record's canonical element inside `container` and
    /// parses it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the element is absent,
    /// or whatever fault [`parse_xml`](Self::parse_xml) raises.
    fn parse_in(container: &XmlNode) -> Result<Self, ParseError> {
        let node = container.require(Self::ELEMENT)?;
        Self::parse_xml(node)
    }

    /// Serialises the record under its canonical element name.
    ///
    /// # Errors
    ///
    /// As [`write_xml`](Self::write_xml).
    fn write(&self, writer: &mut XmlWriter) -> Result<(), WriteError> {
        self.write_xml(Self::ELEMENT, writer)
    }

    /// Parses a record from a fragment string whose root element is this
    /// record's canonical element.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedRoot`] if the fragment's root is a
    /// different element, or whatever fault parsing raises.
    fn from_xml_str(xml: &str) -> Result<Self, ParseError> {
        let node = XmlNode::parse_str(xml)?;
        if node.name() != Self::ELEMENT {
            return Err(ParseError::UnexpectedRoot {
                expected: Self::ELEMENT.to_string(),
                found: node.name().to_string(),
            });
        }
        Self::parse_xml(&node)
    }

    /// Serialises the record to a fragment string under its canonical
    /// element name.
    ///
    /// # Errors
    ///
    /// As [`write_xml`](Self::write_xml), plus [`WriteError::Utf8`] on a
    /// non-UTF-8 buffer.
    fn to_xml(&self) -> Result<String, WriteError> {
        let mut writer = XmlWriter::new();
        self.write(&mut writer)?;
        writer.into_string()
    }
}

/// Resolves a mandatory field at write time.
///
/// # Errors
///
/// Returns [`WriteError::UnsetField`] naming the record and field when
/// the value was never set.
pub fn required<'a, T>(
    record: &'static str,
    field: &'static str,
    value: &'a Option<T>,
) -> Result<&'a T, WriteError> {
    value.as_ref().ok_or(WriteError::UnsetField { record, field })
}

/// Resolves a mandatory collection at write time.
///
/// # Errors
///
/// Returns [`WriteError::EmptyCollection`] naming the record and field
/// when the collection holds no entries.
pub fn required_slice<'a, T>(
    record: &'static str,
    field: &'static str,
    values: &'a [T],
) -> Result<&'a [T], WriteError> {
    match check::non_empty_slice(field, values) {
        Ok(()) => Ok(values),
        Err(_) => Err(WriteError::EmptyCollection { record, field }),
    }
}

/// Writes a nested record only if it is present.
///
/// # Errors
///
/// Propagates whatever fault the nested write raises.
pub fn opt_item<T: XmlItem>(
    writer: &mut XmlWriter,
    name: &str,
    value: &Option<T>,
) -> Result<(), WriteError> {
    match value {
        Some(item) => item.write_xml(name, writer),
        None => Ok(()),
    }
}

/// Writes one element per entry, in sequence order. An empty slice emits
/// nothing.
///
/// # Errors
///
/// Propagates whatever fault a nested write raises.
pub fn repeated<T: XmlItem>(
    writer: &mut XmlWriter,
    name: &str,
    items: &[T],
) -> Result<(), WriteError> {
    for item in items {
        item.write_xml(name, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        count: Option<u32>,
        note: Option<String>,
    }

    impl XmlItem for Sample {
        const ELEMENT: &'static str = "sample";

        fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
            Ok(Self {
                count: Some(node.require_u32("count")?),
                note: node.optional_text("note"),
            })
        }

        fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
            let count = required(Self::ELEMENT, "count", &self.count)?;
            writer.start(name)?;
            writer.u32_element("count", *count)?;
            writer.opt_text_element("note", self.note.as_deref())?;
            writer.end()
        }
    }

    #[test]
    fn round_trips_through_canonical_element() {
        let sample = Sample {
            count: Some(3),
            note: Some("steady".to_string()),
        };
        let xml = sample.to_xml().unwrap();
        assert_eq!(xml, "<sample><count>3</count><note>steady</note></sample>");
        assert_eq!(Sample::from_xml_str(&xml).unwrap(), sample);
    }

    #[test]
    fn unset_mandatory_field_faults_at_write() {
        let sample = Sample::default();
        let err = sample.to_xml().unwrap_err();
        match err {
            WriteError::UnsetField { record, field } => {
                assert_eq!(record, "sample");
                assert_eq!(field, "count");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_xml_str_rejects_wrong_root() {
        let err = Sample::from_xml_str("<other><count>1</count></other>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
    }

    #[test]
    fn parse_in_locates_child_element() {
        let container =
            XmlNode::parse_str("<data-xml><sample><count>2</count></sample></data-xml>").unwrap();
        let sample = Sample::parse_in(&container).unwrap();
        assert_eq!(sample.count, Some(2));

        let empty = XmlNode::parse_str("<data-xml></data-xml>").unwrap();
        assert!(matches!(
            Sample::parse_in(&empty),
            Err(ParseError::MissingElement { .. })
        ));
    }

    #[test]
    fn required_slice_faults_on_empty() {
        let entries: Vec<u32> = Vec::new();
        let err = required_slice("alert", "dow", &entries).unwrap_err();
        match err {
            WriteError::EmptyCollection { record, field } => {
                assert_eq!(record, "alert");
                assert_eq!(field, "dow");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(required_slice("alert", "dow", &[1u32]).is_ok());
    }

    #[test]
    fn repeated_writes_in_sequence_order() {
        let items = vec![
            Sample {
                count: Some(1),
                note: None,
            },
            Sample {
                count: Some(2),
                note: None,
            },
        ];
        let mut writer = XmlWriter::new();
        writer.start("list").unwrap();
        repeated(&mut writer, "sample", &items).unwrap();
        writer.end().unwrap();
        assert_eq!(
            writer.into_string().unwrap(),
            "<list><sample><count>1</count></sample><sample><count>2</count></sample></list>"
        );
    }

    #[test]
    fn opt_item_emits_nothing_when_absent() {
        let mut writer = XmlWriter::new();
        writer.start("holder").unwrap();
        opt_item::<Sample>(&mut writer, "sample", &None).unwrap();
        writer.end().unwrap();
        assert_eq!(writer.into_string().unwrap(), "<holder></holder>");
    }
}
