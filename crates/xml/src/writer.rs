//! Write-side XML emission.
//!
//! [`XmlWriter`] is a thin streaming layer over `quick_xml::Writer` with
//! typed element helpers. The `opt_*` forms implement the optional-field
//! contract: an absent value emits nothing at all, never an empty
//! placeholder element.

use chrono::{NaiveDate, NaiveDateTime};
use healthbook_types::NonBlankText;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::WriteError;

/// Streaming XML fragment writer.
///
/// Elements are opened with [`start`](Self::start) (or
/// [`start_with_attributes`](Self::start_with_attributes)) and closed in
/// LIFO order with [`end`](Self::end). Text escaping is handled by the
/// underlying writer on both scalar and attribute values.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
    open: Vec<String>,
}

impl XmlWriter {
    /// Creates a writer over an empty buffer.
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
            open: Vec::new(),
        }
    }

    /// Opens an element.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn start(&mut self, name: &str) -> Result<(), WriteError> {
        self.inner
            .write_event(Event::Start(BytesStart::new(name.to_string())))?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Opens an element carrying the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn start_with_attributes(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), WriteError> {
        let mut start = BytesStart::new(name.to_string());
        for (key, value) in attributes {
            start.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Start(start))?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Closes the most recently opened element.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Unbalanced`] if no element is open, or
    /// [`WriteError::Xml`] if the underlying writer fails.
    pub fn end(&mut self) -> Result<(), WriteError> {
        let name = self.open.pop().ok_or(WriteError::Unbalanced)?;
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes one child element holding the given text.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn text_element(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        self.inner
            .write_event(Event::Start(BytesStart::new(name.to_string())))?;
        self.inner.write_event(Event::Text(BytesText::new(value)))?;
        self.inner
            .write_event(Event::End(BytesEnd::new(name.to_string())))?;
        Ok(())
    }

    /// Writes one child element holding a floating-point number in its
    /// shortest decimal form (`0.97`, not `0.970`).
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn f64_element(&mut self, name: &str, value: f64) -> Result<(), WriteError> {
        self.text_element(name, &value.to_string())
    }

    /// Writes one child element holding an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn u32_element(&mut self, name: &str, value: u32) -> Result<(), WriteError> {
        self.text_element(name, &value.to_string())
    }

    /// Writes one child element holding `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn bool_element(&mut self, name: &str, value: bool) -> Result<(), WriteError> {
        self.text_element(name, if value { "true" } else { "false" })
    }

    /// Writes one child element holding an ISO 8601 date-time. Fractional
    /// seconds appear only when non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn datetime_element(&mut self, name: &str, value: &NaiveDateTime) -> Result<(), WriteError> {
        self.text_element(name, &value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    /// Writes one child element holding an ISO 8601 date.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn date_element(&mut self, name: &str, value: &NaiveDate) -> Result<(), WriteError> {
        self.text_element(name, &value.to_string())
    }

    /// Writes a text element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_text_element(&mut self, name: &str, value: Option<&str>) -> Result<(), WriteError> {
        match value {
            Some(value) => self.text_element(name, value),
            None => Ok(()),
        }
    }

    /// Writes a non-blank text element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_nonblank_element(
        &mut self,
        name: &str,
        value: Option<&NonBlankText>,
    ) -> Result<(), WriteError> {
        self.opt_text_element(name, value.map(NonBlankText::as_str))
    }

    /// Writes a floating-point element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_f64_element(&mut self, name: &str, value: Option<f64>) -> Result<(), WriteError> {
        match value {
            Some(value) => self.f64_element(name, value),
            None => Ok(()),
        }
    }

    /// Writes an unsigned-integer element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_u32_element(&mut self, name: &str, value: Option<u32>) -> Result<(), WriteError> {
        match value {
            Some(value) => self.u32_element(name, value),
            None => Ok(()),
        }
    }

    /// Writes a boolean element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_bool_element(&mut self, name: &str, value: Option<bool>) -> Result<(), WriteError> {
        match value {
            Some(value) => self.bool_element(name, value),
            None => Ok(()),
        }
    }

    /// Writes a date-time element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_datetime_element(
        &mut self,
        name: &str,
        value: Option<&NaiveDateTime>,
    ) -> Result<(), WriteError> {
        match value {
            Some(value) => self.datetime_element(name, value),
            None => Ok(()),
        }
    }

    /// Writes a date element only if the value is present.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Xml`] if the underlying writer fails.
    pub fn opt_date_element(&mut self, name: &str, value: Option<&NaiveDate>) -> Result<(), WriteError> {
        match value {
            Some(value) => self.date_element(name, value),
            None => Ok(()),
        }
    }

    /// Consumes the writer and returns the serialised fragment.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Utf8`] if the buffer is not valid UTF-8.
    pub fn into_string(self) -> Result<String, WriteError> {
        Ok(String::from_utf8(self.inner.into_inner())?)
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
