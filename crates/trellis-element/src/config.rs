use serde::{Deserialize, Serialize};

/// Application-wide settings, passed explicitly at registry construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Namespace prefix for instance ids (and conventionally for tag names).
    pub id: String,
    pub name: String,
    pub version: String,
    pub cookie: CookieConfig,
    pub net: NetConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CookieConfig {
    pub domain: String,
    pub path: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NetConfig {
    /// Credential attached to `put` requests only.
    pub bearer_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: "wc".into(),
            name: "web-component".into(),
            version: "1.0.0".into(),
            cookie: CookieConfig::default(),
            net: NetConfig::default(),
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: "localhost".into(),
            path: "/".into(),
        }
    }
}
