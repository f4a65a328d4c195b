use once_cell::sync::Lazy;
use regex::Regex;

pub use serde_json::Value;

/// Integer/decimal literals are kept as text, never coerced to numbers.
static NUMERIC_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric literal pattern"));

/// HTML-escapes `& < > " '`.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [`escape`], and only that: the five named entities.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let replaced = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ]
        .iter()
        .find(|(entity, _)| rest.starts_with(entity));
        match replaced {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn is_numeric_literal(raw: &str) -> bool {
    NUMERIC_LITERAL.is_match(raw)
}

/// Converts raw attribute text into a typed store value.
///
/// Policy, in order: a removed attribute (`None`) becomes the empty string;
/// numeric-looking text stays an escaped string; anything that parses as
/// JSON becomes the parsed structure; everything else is escaped text.
pub fn parse_attribute(raw: Option<&str>) -> Value {
    let Some(raw) = raw else {
        return Value::String(String::new());
    };

    if is_numeric_literal(raw) {
        return Value::String(escape(raw));
    }

    match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(escape(raw)),
    }
}

/// Serializes a store value back into HTML attribute text.
///
/// Booleans follow the bare-attribute convention: `true` renders the
/// attribute name alone, `false` renders nothing.
pub fn to_attribute(name: &str, value: &Value) -> String {
    if let Value::Bool(flag) = value {
        return if *flag { name.to_string() } else { String::new() };
    }

    if name.is_empty() {
        return String::new();
    }

    match value {
        Value::Object(_) | Value::Array(_) => {
            format!("{name}=\"{}\"", escape(&value.to_string()))
        }
        Value::String(text) => {
            let text = escape(text)
                .replace("\r\n", "<br>")
                .replace('\n', "<br>")
                .replace('\r', "<br>");
            format!("{name}=\"{text}\"")
        }
        Value::Null => format!("{name}=\"\""),
        other => format!("{name}=\"{other}\""),
    }
}

/// Render text for a store value. Strings pass through untouched (they were
/// escaped at parse time); structures render as escaped JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Object(_) | Value::Array(_) => escape(&value.to_string()),
    }
}
