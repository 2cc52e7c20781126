//! XML codec for HealthBook item types.
//!
//! This crate defines, once, how "a field may or may not be present" is
//! represented on the wire and how that maps to an in-memory `Option`,
//! applied uniformly by every record:
//! - [`XmlNode`]: an owned, navigable, read-only element tree with typed
//!   scalar readers (`require_*` / `optional_*`).
//! - [`XmlWriter`]: a streaming fragment writer with typed element
//!   emitters (`*_element` / `opt_*_element`).
//! - [`XmlItem`]: the capability trait every record implements, plus the
//!   mandatory-field helpers [`required`] and [`required_slice`] and the
//!   nested-record writers [`opt_item`] and [`repeated`].
//!
//! Absence is a first-class state: an unset optional field emits no
//! element and a missing optional element decodes to `None`, never to a
//! default value. This crate carries no clinical knowledge.

pub mod document;
pub mod error;
pub mod item;
pub mod writer;

pub use document::XmlNode;
pub use error::{ParseError, WriteError};
pub use item::{opt_item, repeated, required, required_slice, XmlItem};
pub use writer::XmlWriter;
