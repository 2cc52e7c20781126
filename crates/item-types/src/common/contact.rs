//! Postal, telephone and email contact details.

use healthbook_types::NonBlankText;
use healthbook_xml::{
    repeated, required, required_slice, ParseError, WriteError, XmlItem, XmlNode, XmlWriter,
};
use serde::{Deserialize, Serialize};

/// A postal address.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Address {
    /// A label such as "home" or "work".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this is the preferred address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,

    /// Street lines, in order. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub street: Vec<NonBlankText>,

    /// City. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<NonBlankText>,

    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<NonBlankText>,

    /// Country. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<NonBlankText>,

    /// County or district.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
}

impl XmlItem for Address {
    const ELEMENT: &'static str = "address";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        let mut street = Vec::new();
        for child in node.children("street") {
            let line = NonBlankText::new(child.text())
                .map_err(|source| node.constraint("street", source))?;
            street.push(line);
        }
        Ok(Self {
            description: node.optional_text("description"),
            is_primary: node.optional_bool("is-primary")?,
            street,
            city: Some(node.require_nonblank("city")?),
            state: node.optional_text("state"),
            postcode: Some(node.require_nonblank("postcode")?),
            country: Some(node.require_nonblank("country")?),
            county: node.optional_text("county"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let street = required_slice(Self::ELEMENT, "street", &self.street)?;
        let city = required(Self::ELEMENT, "city", &self.city)?;
        let postcode = required(Self::ELEMENT, "postcode", &self.postcode)?;
        let country = required(Self::ELEMENT, "country", &self.country)?;

        writer.start(name)?;
        writer.opt_text_element("description", self.description.as_deref())?;
        writer.opt_bool_element("is-primary", self.is_primary)?;
        for line in street {
            writer.text_element("street", line.as_str())?;
        }
        writer.text_element("city", city.as_str())?;
        writer.opt_text_element("state", self.state.as_deref())?;
        writer.text_element("postcode", postcode.as_str())?;
        writer.text_element("country", country.as_str())?;
        writer.opt_text_element("county", self.county.as_deref())?;
        writer.end()
    }
}

/// A telephone number.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PhoneNumber {
    /// A label such as "mobile" or "work".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this is the preferred number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,

    /// The number itself. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<NonBlankText>,
}

impl XmlItem for PhoneNumber {
    const ELEMENT: &'static str = "phone";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            description: node.optional_text("description"),
            is_primary: node.optional_bool("is-primary")?,
            number: Some(node.require_nonblank("number")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let number = required(Self::ELEMENT, "number", &self.number)?;
        writer.start(name)?;
        writer.opt_text_element("description", self.description.as_deref())?;
        writer.opt_bool_element("is-primary", self.is_primary)?;
        writer.text_element("number", number.as_str())?;
        writer.end()
    }
}

/// An email address.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmailAddress {
    /// A label such as "personal" or "work".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this is the preferred address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,

    /// The address itself. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<NonBlankText>,
}

impl XmlItem for EmailAddress {
    const ELEMENT: &'static str = "email";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            description: node.optional_text("description"),
            is_primary: node.optional_bool("is-primary")?,
            address: Some(node.require_nonblank("address")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let address = required(Self::ELEMENT, "address", &self.address)?;
        writer.start(name)?;
        writer.opt_text_element("description", self.description.as_deref())?;
        writer.opt_bool_element("is-primary", self.is_primary)?;
        writer.text_element("address", address.as_str())?;
        writer.end()
    }
}

/// A bundle of contact details. At least one entry, of any kind, is
/// mandatory at serialisation time.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContactInfo {
    /// Postal addresses, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    /// Telephone numbers, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone: Vec<PhoneNumber>,

    /// Email addresses, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<EmailAddress>,
}

impl ContactInfo {
    /// True when no contact detail of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.address.is_empty() && self.phone.is_empty() && self.email.is_empty()
    }
}

impl XmlItem for ContactInfo {
    const ELEMENT: &'static str = "contact";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            address: node.repeated_items("address")?,
            phone: node.repeated_items("phone")?,
            email: node.repeated_items("email")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        if self.is_empty() {
            return Err(WriteError::EmptyCollection {
                record: Self::ELEMENT,
                field: "address/phone/email",
            });
        }
        writer.start(name)?;
        repeated(writer, "address", &self.address)?;
        repeated(writer, "phone", &self.phone)?;
        repeated(writer, "email", &self.email)?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthbook_xml::XmlWriter;

    fn sample_address() -> Address {
        Address {
            description: Some("home".to_string()),
            is_primary: Some(true),
            street: vec![
                NonBlankText::new("1 Riverside Walk").expect("non-blank"),
                NonBlankText::new("Flat 3").expect("non-blank"),
            ],
            city: Some(NonBlankText::new("Sheffield").expect("non-blank")),
            state: None,
            postcode: Some(NonBlankText::new("S1 2BJ").expect("non-blank")),
            country: Some(NonBlankText::new("UK").expect("non-blank")),
            county: Some("South Yorkshire".to_string()),
        }
    }

    #[test]
    fn round_trips_address_with_two_street_lines() {
        let address = sample_address();
        let mut writer = XmlWriter::new();
        address.write_xml("address", &mut writer).expect("complete address");
        let xml = writer.into_string().expect("utf-8 output");

        let node = XmlNode::parse_str(&xml).expect("well-formed output");
        let parsed = Address::parse_xml(&node).expect("parses back");
        assert_eq!(parsed, address);
        assert_eq!(
            parsed.street.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            vec!["1 Riverside Walk", "Flat 3"]
        );
    }

    #[test]
    fn address_without_street_lines_faults_at_write() {
        let mut address = sample_address();
        address.street.clear();
        let mut writer = XmlWriter::new();
        match address.write_xml("address", &mut writer) {
            Err(WriteError::EmptyCollection { record, field }) => {
                assert_eq!(record, "address");
                assert_eq!(field, "street");
            }
            other => panic!("expected an empty-collection fault, got {other:?}"),
        }
    }

    #[test]
    fn parses_contact_with_mixed_entries() {
        let xml = "<contact>\
                   <phone><number>0114 496 0000</number></phone>\
                   <email><description>work</description><address>jo@example.org</address></email>\
                   </contact>";
        let node = XmlNode::parse_str(xml).expect("well-formed fragment");
        let contact = ContactInfo::parse_xml(&node).expect("valid contact");

        assert!(contact.address.is_empty());
        assert_eq!(contact.phone.len(), 1);
        assert_eq!(contact.email.len(), 1);
        assert_eq!(
            contact.email[0].address.as_ref().map(|a| a.as_str()),
            Some("jo@example.org")
        );
    }

    #[test]
    fn empty_contact_faults_at_write_but_parses() {
        let node = XmlNode::parse_str("<contact></contact>").expect("well-formed");
        let contact = ContactInfo::parse_xml(&node).expect("an empty fragment parses");
        assert!(contact.is_empty());

        let mut writer = XmlWriter::new();
        match contact.write_xml("contact", &mut writer) {
            Err(WriteError::EmptyCollection { record, .. }) => assert_eq!(record, "contact"),
            other => panic!("expected an empty-collection fault, got {other:?}"),
        }
    }

    #[test]
    fn phone_renders_optional_fields_only_when_set() {
        let phone = PhoneNumber {
            description: None,
            is_primary: Some(false),
            number: Some(NonBlankText::new("0114 496 0000").expect("non-blank")),
        };
        let mut writer = XmlWriter::new();
        phone.write_xml("phone", &mut writer).expect("complete phone");
        let xml = writer.into_string().expect("utf-8 output");

        assert_eq!(
            xml,
            "<phone><is-primary>false</is-primary><number>0114 496 0000</number></phone>"
        );
        assert!(!xml.contains("description"));
    }
}
