//! # Element lifecycle runtime
//!
//! This crate binds the reactive core to a custom-element lifecycle:
//! components are defined in a [`Registry`] under a tag name, instantiated
//! by a [`Runtime`], and driven through
//! `constructed → connected → disconnected`, with attribute changes and
//! adoption re-entrant at any point.
//!
//! Each instance owns a generated id (`"<app-id>-<uuid>"`), a shallow
//! attribute store, and a deep property store. Store mutations dispatch
//! synchronously to render targets — DOM nodes whose id is
//! `<instance-uuid>-<key>` inside the instance's subtree. List-valued
//! changes route to the items renderer instead of the generic one.
//!
//! ```rust
//! use trellis_element::prelude::*;
//!
//! struct Badge;
//!
//! impl Component for Badge {
//!     fn render(&self, cx: &RenderContext<'_>) -> String {
//!         format!("<span {}>{}</span>", cx.target_attr("label"), cx.text("label"))
//!     }
//! }
//!
//! let mut registry = Registry::new(AppConfig::default());
//! registry
//!     .define("wc-badge", Definition::new(|| Badge).observe(["label"]))
//!     .unwrap();
//!
//! let mut runtime = Runtime::new(registry);
//! let badge = runtime.create("wc-badge").unwrap();
//! runtime.set_attribute(badge, "label", "hi").unwrap();
//! ```

pub mod capability;
pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod tests;

pub use capability::*;
pub use component::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use registry::*;
pub use render::{target_attr, target_id};
pub use runtime::*;
