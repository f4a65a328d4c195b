use trellis_core::{escape, unescape};

use crate::error::DomError;

/// Elements that never carry children and serialize without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parsed fragment tree, independent of any arena.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

/// Parses an HTML-ish fragment: elements with double-quoted or bare
/// attributes, text with the five standard entities, comments skipped.
/// Unclosed or mismatched tags are errors.
pub fn parse_fragment(input: &str) -> Result<Vec<MarkupNode>, DomError> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    let mut roots = Vec::new();
    // open-element stack: (tag, attributes, children collected so far)
    let mut stack: Vec<(String, Vec<(String, String)>, Vec<MarkupNode>)> = Vec::new();

    fn push_node(
        roots: &mut Vec<MarkupNode>,
        stack: &mut [(String, Vec<(String, String)>, Vec<MarkupNode>)],
        node: MarkupNode,
    ) {
        match stack.last_mut() {
            Some((_, _, children)) => children.push(node),
            None => roots.push(node),
        }
    }

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            if input[pos..].starts_with("<!--") {
                let end = input[pos..].find("-->").ok_or_else(|| DomError::Malformed {
                    detail: "unterminated comment".into(),
                })?;
                pos += end + 3;
                continue;
            }

            if input[pos..].starts_with("</") {
                let end = input[pos..].find('>').ok_or_else(|| DomError::Malformed {
                    detail: "unterminated closing tag".into(),
                })?;
                let found = input[pos + 2..pos + end].trim().to_ascii_lowercase();
                let (tag, attributes, children) =
                    stack.pop().ok_or_else(|| DomError::Malformed {
                        detail: format!("closing </{found}> without an open element"),
                    })?;
                if tag != found {
                    return Err(DomError::MismatchedTag {
                        expected: tag,
                        found,
                    });
                }
                push_node(
                    &mut roots,
                    &mut stack,
                    MarkupNode::Element {
                        tag,
                        attributes,
                        children,
                    },
                );
                pos += end + 1;
                continue;
            }

            let end = input[pos..].find('>').ok_or_else(|| DomError::Malformed {
                detail: "unterminated tag".into(),
            })?;
            let raw_tag = &input[pos + 1..pos + end];
            let self_closing = raw_tag.ends_with('/');
            let raw_tag = raw_tag.trim_end_matches('/');

            let (tag, attributes) = parse_tag(raw_tag)?;
            if self_closing || is_void_element(&tag) {
                push_node(
                    &mut roots,
                    &mut stack,
                    MarkupNode::Element {
                        tag,
                        attributes,
                        children: Vec::new(),
                    },
                );
            } else {
                stack.push((tag, attributes, Vec::new()));
            }
            pos += end + 1;
        } else {
            let end = input[pos..].find('<').unwrap_or(input.len() - pos);
            let text = &input[pos..pos + end];
            if !text.is_empty() {
                push_node(&mut roots, &mut stack, MarkupNode::Text(unescape(text)));
            }
            pos += end;
        }
    }

    if let Some((tag, _, _)) = stack.pop() {
        return Err(DomError::Malformed {
            detail: format!("unclosed <{tag}>"),
        });
    }

    Ok(roots)
}

fn parse_tag(raw: &str) -> Result<(String, Vec<(String, String)>), DomError> {
    let raw = raw.trim();
    let name_end = raw
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(raw.len());
    let tag = raw[..name_end].to_ascii_lowercase();
    if tag.is_empty()
        || !tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(DomError::Malformed {
            detail: format!("bad tag name `{tag}`"),
        });
    }

    let mut attributes = Vec::new();
    let mut rest = raw[name_end..].trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_string();
        if name.is_empty() {
            return Err(DomError::Malformed {
                detail: "empty attribute name".into(),
            });
        }
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let Some(quoted) = after_eq.strip_prefix('"') else {
                return Err(DomError::Malformed {
                    detail: format!("attribute `{name}` value must be double-quoted"),
                });
            };
            let close = quoted.find('"').ok_or_else(|| DomError::Malformed {
                detail: format!("unterminated value for attribute `{name}`"),
            })?;
            attributes.push((name, unescape(&quoted[..close])));
            rest = quoted[close + 1..].trim_start();
        } else {
            // bare boolean attribute
            attributes.push((name, String::new()));
        }
    }

    Ok((tag, attributes))
}

/// Serializes one fragment node, escaping text and attribute values.
pub fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Text(text) => out.push_str(&escape(text)),
        MarkupNode::Element {
            tag,
            attributes,
            children,
        } => {
            write_open_tag(out, tag, attributes);
            if is_void_element(tag) {
                return;
            }
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

pub(crate) fn write_open_tag(out: &mut String, tag: &str, attributes: &[(String, String)]) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements() {
        let nodes = parse_fragment(r#"<div><span id="a">hi</span><br></div>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let MarkupNode::Element { tag, children, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(tag, "div");
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn decodes_entities_in_text() {
        let nodes = parse_fragment("<p>Tom &amp; Jerry</p>").unwrap();
        let MarkupNode::Element { children, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(children[0], MarkupNode::Text("Tom & Jerry".into()));
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(matches!(
            parse_fragment("<div><span></div></span>"),
            Err(DomError::MismatchedTag { .. })
        ));
    }

    #[test]
    fn rejects_unclosed_element() {
        assert!(matches!(
            parse_fragment("<div><p>text"),
            Err(DomError::Malformed { .. })
        ));
    }

    #[test]
    fn bare_attributes_round_trip() {
        let nodes = parse_fragment(r#"<input disabled value="x">"#).unwrap();
        let mut out = String::new();
        write_node(&mut out, &nodes[0]);
        assert_eq!(out, r#"<input disabled value="x">"#);
    }
}
