use crate::error::BindError;
use crate::store::Store;
use crate::value::{Value, parse_attribute};

/// Kebab-case to camelCase: `-x` becomes `X` for ASCII lowercase `x`, all
/// other characters pass through. Idempotent.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(ch);
        }
    }
    out
}

/// Binds one serialized attribute into the store.
///
/// Dotted names expand into nested entries, each segment camel-cased. For a
/// plain name whose stored value is currently a boolean, the raw string is
/// reinterpreted under the HTML boolean-attribute convention (present and
/// empty means `true`) instead of the generic parsing policy.
pub fn bind(store: &Store, key: &str, raw: Option<&str>) -> Result<(), BindError> {
    if key.is_empty() {
        return Err(BindError::EmptyKey);
    }

    if key.contains('.') {
        let path = key
            .split('.')
            .map(to_camel_case)
            .collect::<Vec<_>>()
            .join(".");
        store.set(&path, parse_attribute(raw))?;
        return Ok(());
    }

    let camel = to_camel_case(key);
    let next = match store.get(&camel) {
        Some(Value::Bool(_)) => Value::Bool(raw == Some("")),
        _ => parse_attribute(raw),
    };
    store.set(&camel, next)?;
    Ok(())
}
