//! Network and cookie capabilities.
//!
//! [`HttpClient`] is a thin JSON wrapper over a blocking agent: every verb
//! sends `application/json`, skips HTTP caching, and hands back the parsed
//! response body. Transport and decode failures propagate to the caller —
//! there is no internal catch and no retry.
//!
//! [`CookieJar`] models the browser jar for one configured domain and root
//! path: URL-encoded values, optional wall-clock expiry, linear-scan reads.

pub mod cookie;
pub mod error;
pub mod http;

pub use cookie::*;
pub use error::*;
pub use http::*;
