//! Document model for the pawablox catalog.
//!
//! - Live document tree (elements, text, classes, attributes, inline style)
//! - Page description files (JSON) that build a document
//! - HTML serialization

mod document;
mod page;
mod html;

pub use document::{Document, ElementData, NodeId, NodeKind};
pub use page::{NodeSpec, PageSpec, load_page, parse_page};
pub use html::to_html;
