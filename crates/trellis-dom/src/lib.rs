//! A lightweight single-document element tree.
//!
//! This is the render surface components write into: an arena of element and
//! text nodes with stable keys, a `body` root, and id-based lookup for
//! render targets. Markup moves in and out as strings — `set_inner_markup`
//! parses a fragment and replaces a node's children, `inner_markup`
//! serializes them back.
//!
//! ```rust
//! use trellis_dom::Dom;
//!
//! let mut dom = Dom::new();
//! let body = dom.body();
//! dom.set_inner_markup(body, r#"<div id="x-title">hello</div>"#).unwrap();
//!
//! let target = dom.find_by_id(body, "x-title").unwrap();
//! assert_eq!(dom.text_content(target), "hello");
//! ```

pub mod arena;
pub mod error;
pub mod markup;
pub mod tests;

pub use arena::*;
pub use error::*;
pub use markup::{MarkupNode, parse_fragment};
