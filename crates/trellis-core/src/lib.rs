//! # Stores, Signals, and Attribute Binding
//!
//! Trellis keeps component state in explicit observable containers instead of
//! intercepting property access at runtime. There are three main pieces:
//!
//! - `Signal<T>` — observable, reactive value.
//! - `Store` — keyed value store with dot-path resolution and change
//!   subscriptions.
//! - `bind` — converts serialized HTML attribute text into typed store
//!   entries.
//!
//! ## Stores
//!
//! A `Store` holds `serde_json::Value` entries under string keys. Nested
//! paths are written with dots and resolved by the store itself:
//!
//! ```rust
//! use trellis_core::*;
//! use serde_json::json;
//!
//! let store = Store::deep();
//! store.subscribe(|change| {
//!     log::debug!("{} changed: {:?} -> {:?}", change.path, change.old, change.new);
//! });
//!
//! store.set("user.name", json!("Jane")).unwrap();
//! assert_eq!(store.get("user.name"), Some(json!("Jane")));
//! ```
//!
//! Writes notify subscribers synchronously, with the old and new value both
//! available. Writing an equal value is a no-op: no notification fires.
//!
//! A *deep* store additionally classifies mutations of arrays (and of a key
//! literally named `items`) as [`ChangeKind::Items`], so list-valued state
//! can be routed to a list renderer instead of the generic one.
//!
//! ## Attribute binding
//!
//! `bind` is the write path for platform-delivered attribute changes. It
//! camel-cases kebab-cased names, expands dotted names into nested entries,
//! and applies the attribute parsing policy (see [`parse_attribute`]):
//!
//! ```rust
//! use trellis_core::*;
//!
//! let store = Store::shallow();
//! bind(&store, "data-foo-bar", Some("42")).unwrap();
//! assert_eq!(store.get("dataFooBar"), Some("42".into()));
//! ```

pub mod binder;
pub mod error;
pub mod scope;
pub mod signal;
pub mod store;
pub mod value;


pub use binder::*;
pub use error::*;
pub use scope::*;
pub use signal::*;
pub use store::*;
pub use value::*;
