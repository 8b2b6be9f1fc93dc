//! buoycast-xml
//!
//! Owned, read-only element tree over an already-fetched XML payload.
//!
//! This crate defines **only** the document abstraction the
//! reconciliation engine reads: element lookup, attribute access, child
//! iteration, and text content. It does **not**:
//! - fetch data (no HTTP)
//! - know anything about NDFD element names or layouts
//! - expose a general-purpose query language
//!
//! Parsing is delegated to `quick-xml`; the resulting tree owns all of
//! its strings so callers can drop the raw payload immediately.

mod tree;

pub use tree::{Document, Element, Node, XmlError};
