use std::cell::RefCell;

use time::format_description::well_known::Rfc2822;
use time::{Duration, OffsetDateTime};

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

struct Entry {
    key: String,
    encoded: String,
    expires: Option<OffsetDateTime>,
}

/// In-process model of the browser cookie jar, scoped to one domain and one
/// root path.
pub struct CookieJar {
    domain: String,
    path: String,
    clock: Box<dyn Clock>,
    entries: RefCell<Vec<Entry>>,
}

impl CookieJar {
    pub fn new(domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_clock(domain, path, Box::new(SystemClock))
    }

    pub fn with_clock(
        domain: impl Into<String>,
        path: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            domain: domain.into(),
            path: path.into(),
            clock,
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Stores `data` URL-encoded under `key`. A positive `ttl_millis` sets
    /// the expiry to now + ttl; zero or negative means session-only.
    pub fn set(&self, key: &str, data: &str, ttl_millis: i64) {
        let expires = (ttl_millis > 0)
            .then(|| self.clock.now() + Duration::milliseconds(ttl_millis));
        self.store(Entry {
            key: key.to_string(),
            encoded: encode(data),
            expires,
        });
    }

    /// Overwrites `key` with an already-expired value.
    pub fn remove(&self, key: &str) {
        self.store(Entry {
            key: key.to_string(),
            encoded: String::new(),
            expires: Some(OffsetDateTime::UNIX_EPOCH + Duration::seconds(1)),
        });
    }

    fn store(&self, entry: Entry) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|existing| existing.key != entry.key);
        entries.push(entry);
    }

    /// Reads `key` by linearly scanning the serialized jar, exactly the way
    /// `document.cookie` consumers do. Returns the decoded value, or the
    /// empty string when absent.
    pub fn get(&self, key: &str) -> String {
        let raw_name = format!("{key}=");
        for raw_cookie in self.serialize().split(';') {
            let raw_cookie = raw_cookie.trim_start_matches(' ');
            if let Some(encoded) = raw_cookie.strip_prefix(&raw_name) {
                return decode(encoded);
            }
        }
        String::new()
    }

    /// The document-cookie view: `k=v; k2=v2` for every live entry.
    pub fn serialize(&self) -> String {
        let now = self.clock.now();
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.expires.is_none_or(|at| at > now))
            .map(|entry| format!("{}={}", entry.key, entry.encoded))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The full stored record for `key`, in the shape a `document.cookie`
    /// write takes: value, optional `expires`, then domain and path.
    pub fn record(&self, key: &str) -> Option<String> {
        let entries = self.entries.borrow();
        let entry = entries.iter().find(|entry| entry.key == key)?;
        let expires = match entry.expires {
            Some(at) => {
                let stamp = at.format(&Rfc2822).unwrap_or_default();
                format!("expires={stamp}; ")
            }
            None => String::new(),
        };
        Some(format!(
            "{}={}; {}domain={}; path={}",
            entry.key, entry.encoded, expires, self.domain, self.path
        ))
    }
}

/// `encodeURIComponent` equivalence: unreserved marks pass through,
/// everything else is percent-encoded UTF-8.
fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'%'
            && pos + 2 < bytes.len()
            && let Ok(byte) = u8::from_str_radix(&input[pos + 1..pos + 3], 16)
        {
            out.push(byte);
            pos += 3;
        } else {
            out.push(bytes[pos]);
            pos += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
