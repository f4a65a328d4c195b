use slotmap::{SecondaryMap, SlotMap, new_key_type};

use crate::error::DomError;
use crate::markup::{self, MarkupNode, parse_fragment};

new_key_type! {
    pub struct NodeKey;
}

#[derive(Clone, Debug)]
pub enum Node {
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NodeKey>,
}

/// The document: an arena of nodes under a single `body` root.
pub struct Dom {
    nodes: SlotMap<NodeKey, Node>,
    parents: SecondaryMap<NodeKey, NodeKey>,
    body: NodeKey,
}

impl Dom {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::Element(ElementData {
            tag: "body".into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }));
        Self {
            nodes,
            parents: SecondaryMap::new(),
            body,
        }
    }

    pub fn body(&self) -> NodeKey {
        self.body
    }

    pub fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeKey {
        self.nodes.insert(Node::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeKey {
        self.nodes.insert(Node::Text(text.to_string()))
    }

    pub fn tag(&self, node: NodeKey) -> Option<&str> {
        match self.nodes.get(node)? {
            Node::Element(data) => Some(&data.tag),
            Node::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.parents.get(node).copied()
    }

    fn element_mut(&mut self, node: NodeKey) -> Result<&mut ElementData, DomError> {
        match self.nodes.get_mut(node) {
            Some(Node::Element(data)) => Ok(data),
            Some(Node::Text(_)) => Err(DomError::NotAnElement),
            None => Err(DomError::MissingNode),
        }
    }

    fn element(&self, node: NodeKey) -> Result<&ElementData, DomError> {
        match self.nodes.get(node) {
            Some(Node::Element(data)) => Ok(data),
            Some(Node::Text(_)) => Err(DomError::NotAnElement),
            None => Err(DomError::MissingNode),
        }
    }

    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        if !self.nodes.contains_key(child) {
            return Err(DomError::MissingNode);
        }
        self.element_mut(parent)?.children.push(child);
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Unlinks `node` from its parent. The subtree stays alive and can be
    /// re-attached later.
    pub fn detach(&mut self, node: NodeKey) -> Result<(), DomError> {
        let Some(parent) = self.parents.remove(node) else {
            return Ok(());
        };
        let data = self.element_mut(parent)?;
        data.children.retain(|&c| c != node);
        Ok(())
    }

    pub fn set_attribute(
        &mut self,
        node: NodeKey,
        name: &str,
        value: &str,
    ) -> Result<Option<String>, DomError> {
        let data = self.element_mut(node)?;
        for (existing, slot) in &mut data.attributes {
            if existing == name {
                return Ok(Some(std::mem::replace(slot, value.to_string())));
            }
        }
        data.attributes.push((name.to_string(), value.to_string()));
        Ok(None)
    }

    pub fn attribute(&self, node: NodeKey, name: &str) -> Option<&str> {
        let data = self.element(node).ok()?;
        data.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove_attribute(&mut self, node: NodeKey, name: &str) -> Result<Option<String>, DomError> {
        let data = self.element_mut(node)?;
        let pos = data.attributes.iter().position(|(existing, _)| existing == name);
        Ok(pos.map(|i| data.attributes.remove(i).1))
    }

    /// Frees a node's children, recursively.
    pub fn clear_children(&mut self, node: NodeKey) -> Result<(), DomError> {
        let children = std::mem::take(&mut self.element_mut(node)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn free_subtree(&mut self, node: NodeKey) {
        if let Some(Node::Element(data)) = self.nodes.get(node) {
            for child in data.children.clone() {
                self.free_subtree(child);
            }
        }
        self.parents.remove(node);
        self.nodes.remove(node);
    }

    /// Parses `markup` and replaces `node`'s children with the result.
    pub fn set_inner_markup(&mut self, node: NodeKey, markup: &str) -> Result<(), DomError> {
        let fragment = parse_fragment(markup)?;
        self.element(node)?;
        self.clear_children(node)?;
        for parsed in &fragment {
            let child = self.insert_fragment(parsed);
            self.append_child(node, child)?;
        }
        Ok(())
    }

    fn insert_fragment(&mut self, node: &MarkupNode) -> NodeKey {
        match node {
            MarkupNode::Text(text) => self.create_text(text),
            MarkupNode::Element {
                tag,
                attributes,
                children,
            } => {
                let key = self.nodes.insert(Node::Element(ElementData {
                    tag: tag.clone(),
                    attributes: attributes.clone(),
                    children: Vec::new(),
                }));
                for child in children {
                    let child_key = self.insert_fragment(child);
                    if let Some(Node::Element(data)) = self.nodes.get_mut(key) {
                        data.children.push(child_key);
                    }
                    self.parents.insert(child_key, key);
                }
                key
            }
        }
    }

    /// Serializes `node`'s children.
    pub fn inner_markup(&self, node: NodeKey) -> String {
        let mut out = String::new();
        if let Ok(data) = self.element(node) {
            for &child in &data.children {
                self.write_subtree(&mut out, child);
            }
        }
        out
    }

    /// Serializes `node` itself, including its tag.
    pub fn outer_markup(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.write_subtree(&mut out, node);
        out
    }

    fn write_subtree(&self, out: &mut String, node: NodeKey) {
        match self.nodes.get(node) {
            Some(Node::Text(text)) => out.push_str(&trellis_core::escape(text)),
            Some(Node::Element(data)) => {
                markup::write_open_tag(out, &data.tag, &data.attributes);
                if markup::is_void_element(&data.tag) {
                    return;
                }
                for &child in &data.children {
                    self.write_subtree(out, child);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
            None => {}
        }
    }

    /// Depth-first search for an element with the given `id` attribute,
    /// starting below `root`.
    pub fn find_by_id(&self, root: NodeKey, id: &str) -> Option<NodeKey> {
        let data = self.element(root).ok()?;
        let mut pending: Vec<NodeKey> = data.children.iter().rev().copied().collect();
        while let Some(node) = pending.pop() {
            if let Some(Node::Element(data)) = self.nodes.get(node) {
                if self.attribute(node, "id") == Some(id) {
                    return Some(node);
                }
                pending.extend(data.children.iter().rev().copied());
            }
        }
        None
    }

    /// Concatenated text of the subtree, entities decoded.
    pub fn text_content(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, node);
        out
    }

    fn collect_text(&self, out: &mut String, node: NodeKey) {
        match self.nodes.get(node) {
            Some(Node::Text(text)) => out.push_str(text),
            Some(Node::Element(data)) => {
                for &child in &data.children {
                    self.collect_text(out, child);
                }
            }
            None => {}
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
