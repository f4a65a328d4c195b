use serde_json::Value;
use trellis_core::value_text;
use trellis_dom::{Dom, DomError, NodeKey};

use crate::component::report;
use crate::events::{ElementEvent, EventBus};

/// The load-bearing id convention: `<instance-uuid>-<logicalKey>`.
pub fn target_id(uuid: &str, key: &str) -> String {
    format!("{uuid}-{key}")
}

/// The same id as interpolation-ready attribute text. Empty keys render
/// nothing, so malformed interpolations degrade to no target.
pub fn target_attr(uuid: &str, key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    format!("id=\"{}\"", target_id(uuid, key))
}

/// Replaces the content of the `<uuid>-<key>` node under `host`, if any.
/// A missing target is a silent no-op; a failing mutation is reported and
/// swallowed.
pub(crate) fn render_target(
    dom: &mut Dom,
    host: NodeKey,
    tag: &str,
    events: &EventBus,
    uuid: &str,
    key: &str,
    value: &Value,
) {
    match replace_target(dom, host, uuid, key, &value_text(value)) {
        Ok(true) => events.emit(&ElementEvent::TargetRendered {
            key: key.to_string(),
        }),
        Ok(false) => {}
        Err(error) => report(tag, &error),
    }
}

/// List flavor: the container re-renders in full as an `<li>` sequence.
pub(crate) fn render_items_target(
    dom: &mut Dom,
    host: NodeKey,
    tag: &str,
    events: &EventBus,
    uuid: &str,
    key: &str,
    value: &Value,
) {
    match replace_target(dom, host, uuid, key, &items_markup(value)) {
        Ok(true) => events.emit(&ElementEvent::TargetRendered {
            key: key.to_string(),
        }),
        Ok(false) => {}
        Err(error) => report(tag, &error),
    }
}

fn replace_target(
    dom: &mut Dom,
    host: NodeKey,
    uuid: &str,
    key: &str,
    markup: &str,
) -> Result<bool, DomError> {
    if !dom.contains(host) {
        return Ok(false);
    }
    let Some(target) = dom.find_by_id(host, &target_id(uuid, key)) else {
        return Ok(false);
    };
    dom.set_inner_markup(target, markup)?;
    Ok(true)
}

fn items_markup(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let mut out = String::new();
            for item in items {
                out.push_str("<li>");
                out.push_str(&value_text(item));
                out.push_str("</li>");
            }
            out
        }
        other => format!("<li>{}</li>", value_text(other)),
    }
}
