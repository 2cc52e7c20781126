//! Read-side XML tree.
//!
//! [`XmlNode`] is an owned, navigable element tree materialised from an
//! XML fragment in one pass over `quick-xml` events. Records parse from a
//! node by looking up child elements by name and converting their text
//! through the typed readers here, so absence, malformed text, and
//! constraint violations are each reported distinctly.

use chrono::{NaiveDate, NaiveDateTime};
use healthbook_types::{NonBlankText, ValidationError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::item::XmlItem;

/// One element of a parsed XML fragment.
///
/// Holds the element name, its attributes in document order, the
/// concatenated (trimmed) text content, and the child elements in
/// document order. Mixed content is not modelled; text interleaved with
/// children is concatenated.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parses an XML fragment into a tree rooted at its single root
    /// element.
    ///
    /// Whitespace-only text runs are discarded and element text is
    /// trimmed, so pretty-printed fragments parse identically to compact
    /// ones. Comments, processing instructions, and the XML declaration
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Xml`] for malformed XML and
    /// [`ParseError::NoRootElement`] if the input holds no element at
    /// all.
    pub fn parse_str(xml: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(XmlNode::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let node = XmlNode::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => return Ok(node),
                    }
                }
                Event::End(_) => {
                    // The reader rejects mismatched close tags, so an End
                    // event always has a node on the stack.
                    let node = stack.pop().ok_or(ParseError::NoRootElement)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => return Ok(node),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => return Err(ParseError::NoRootElement),
                _ => {}
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(XmlNode {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Returns this element's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns this element's trimmed text content. Empty if the element
    /// holds no text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the first child element with the given name, in document
    /// order, or `None` if no such child exists.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the first child element with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if no such child exists.
    pub fn require(&self, name: &str) -> Result<&XmlNode, ParseError> {
        self.child(name).ok_or_else(|| ParseError::MissingElement {
            parent: self.name.clone(),
            element: name.to_string(),
        })
    }

    /// Returns every child element with the given name, in document
    /// order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the value of the named attribute, or `None` if it is not
    /// present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds a [`ParseError::Constraint`] for a child of this element.
    ///
    /// Used when a value read from `element` fails a field constraint, so
    /// the fault still carries the wire context.
    pub fn constraint(&self, element: &str, source: ValidationError) -> ParseError {
        ParseError::Constraint {
            parent: self.name.clone(),
            element: element.to_string(),
            source,
        }
    }

    /// Builds a [`ParseError::Malformed`] for a child of this element.
    pub fn malformed(&self, element: &str, expected: &'static str, text: &str) -> ParseError {
        ParseError::Malformed {
            parent: self.name.clone(),
            element: element.to_string(),
            expected,
            text: text.to_string(),
        }
    }

    fn scalar<T: std::str::FromStr>(
        &self,
        child: &XmlNode,
        expected: &'static str,
    ) -> Result<T, ParseError> {
        child
            .text
            .parse::<T>()
            .map_err(|_| self.malformed(&child.name, expected, &child.text))
    }

    /// Reads the text of a required child element.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent.
    pub fn require_text(&self, name: &str) -> Result<String, ParseError> {
        Ok(self.require(name)?.text.clone())
    }

    /// Reads the text of an optional child element. Absence yields
    /// `None`; a present-but-empty element yields `Some("")`.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|child| child.text.clone())
    }

    /// Reads a required child element as [`NonBlankText`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Constraint`] if its text is blank.
    pub fn require_nonblank(&self, name: &str) -> Result<NonBlankText, ParseError> {
        let child = self.require(name)?;
        NonBlankText::new(&child.text).map_err(|source| self.constraint(name, source))
    }

    /// Reads an optional child element as [`NonBlankText`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Constraint`] if the child is present but its
    /// text is blank.
    pub fn optional_nonblank(&self, name: &str) -> Result<Option<NonBlankText>, ParseError> {
        match self.child(name) {
            Some(child) => NonBlankText::new(&child.text)
                .map(Some)
                .map_err(|source| self.constraint(name, source)),
            None => Ok(None),
        }
    }

    /// Reads a required child element as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Malformed`] if its text is not numeric.
    pub fn require_f64(&self, name: &str) -> Result<f64, ParseError> {
        let child = self.require(name)?;
        self.scalar(child, "floating-point number")
    }

    /// Reads an optional child element as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the child is present but its
    /// text is not numeric. Absence is not an error.
    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>, ParseError> {
        match self.child(name) {
            Some(child) => self.scalar(child, "floating-point number").map(Some),
            None => Ok(None),
        }
    }

    /// Reads a required child element as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Malformed`] if its text is not an unsigned integer.
    pub fn require_u32(&self, name: &str) -> Result<u32, ParseError> {
        let child = self.require(name)?;
        self.scalar(child, "unsigned integer")
    }

    /// Reads an optional child element as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the child is present but its
    /// text is not an unsigned integer.
    pub fn optional_u32(&self, name: &str) -> Result<Option<u32>, ParseError> {
        match self.child(name) {
            Some(child) => self.scalar(child, "unsigned integer").map(Some),
            None => Ok(None),
        }
    }

    fn bool_from(&self, child: &XmlNode) -> Result<bool, ParseError> {
        match child.text.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(self.malformed(&child.name, "boolean", other)),
        }
    }

    /// Reads a required child element as a boolean. Accepts `true`,
    /// `false`, `1`, and `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Malformed`] for any other text.
    pub fn require_bool(&self, name: &str) -> Result<bool, ParseError> {
        let child = self.require(name)?;
        self.bool_from(child)
    }

    /// Reads an optional child element as a boolean. Accepts `true`,
    /// `false`, `1`, and `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the child is present with any
    /// other text.
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, ParseError> {
        match self.child(name) {
            Some(child) => self.bool_from(child).map(Some),
            None => Ok(None),
        }
    }

    /// Reads a required child element as a date-time
    /// (`2024-01-01T00:00:00`, optional fractional seconds).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Malformed`] if its text is not an ISO 8601
    /// date-time.
    pub fn require_datetime(&self, name: &str) -> Result<NaiveDateTime, ParseError> {
        let child = self.require(name)?;
        self.scalar(child, "date-time")
    }

    /// Reads an optional child element as a date-time.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the child is present but its
    /// text is not an ISO 8601 date-time.
    pub fn optional_datetime(&self, name: &str) -> Result<Option<NaiveDateTime>, ParseError> {
        match self.child(name) {
            Some(child) => self.scalar(child, "date-time").map(Some),
            None => Ok(None),
        }
    }

    /// Reads a required child element as a date (`2024-01-01`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// [`ParseError::Malformed`] if its text is not an ISO 8601 date.
    pub fn require_date(&self, name: &str) -> Result<NaiveDate, ParseError> {
        let child = self.require(name)?;
        self.scalar(child, "date")
    }

    /// Reads an optional child element as a date.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if the child is present but its
    /// text is not an ISO 8601 date.
    pub fn optional_date(&self, name: &str) -> Result<Option<NaiveDate>, ParseError> {
        match self.child(name) {
            Some(child) => self.scalar(child, "date").map(Some),
            None => Ok(None),
        }
    }

    /// Parses a required child element as a nested record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingElement`] if the child is absent, or
    /// whatever fault the nested parse raises.
    pub fn require_item<T: XmlItem>(&self, name: &str) -> Result<T, ParseError> {
        let child = self.require(name)?;
        T::parse_xml(child)
    }

    /// Parses an optional child element as a nested record. Absence
    /// yields `None`.
    ///
    /// # Errors
    ///
    /// Propagates whatever fault the nested parse raises when the child
    /// is present.
    pub fn optional_item<T: XmlItem>(&self, name: &str) -> Result<Option<T>, ParseError> {
        match self.child(name) {
            Some(child) => T::parse_xml(child).map(Some),
            None => Ok(None),
        }
    }

    /// Parses every matching child element as a nested record, in
    /// document order. Zero matches yields an empty `Vec`, never a fault.
    ///
    /// # Errors
    ///
    /// Propagates the first fault any nested parse raises.
    pub fn repeated_items<T: XmlItem>(&self, name: &str) -> Result<Vec<T>, ParseError> {
        self.children(name).map(T::parse_xml).collect()
    }
}
