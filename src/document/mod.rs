//! In-memory HTML fragment document.
//!
//! An arena of element and text nodes under an implicit editable root. It is
//! deliberately small: enough structure for inline formatting, block
//! conversion and links, with a parser and a deterministic serializer so tests
//! can compare markup.

pub mod commands;
pub mod host;
pub mod parse;
pub mod selection;

pub use host::DocumentHost;

use crate::error::ParseError;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Tags treated as block-level.
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "div", "li", "ul", "ol",
];

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "img", "hr"];

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// A maximal piece of text together with its formatting context, in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub node: NodeId,
    /// Offset of the first character in the document's text flow.
    pub start: usize,
    pub text: &'a str,
    /// Enclosing tags, nearest first, excluding the root.
    pub tags: Vec<&'a str>,
    /// Nearest block-level ancestor.
    pub block: Option<NodeId>,
}

/// Arena of nodes under a `div` root.
///
/// Ids of nodes dropped by [`unwrap`](Self::unwrap) or
/// [`merge_text`](Self::merge_text) go on a free list and are handed out
/// again by later insertions, so repeated toggling does not grow the arena.
/// Callers must not hold ids across those calls.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Element {
                tag: "div".into(),
                attributes: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            free: Vec::new(),
            root: 0,
        }
    }

    pub fn parse(html: &str) -> Result<Self, ParseError> {
        parse::parse_fragment(html)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn is_block(&self, id: NodeId) -> bool {
        self.tag(id).is_some_and(is_block_tag)
    }

    pub fn create_element(&mut self, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes,
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Return a detached, childless node to the free list.
    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.kind = NodeKind::Text(String::new());
        node.parent = None;
        node.children.clear();
        self.free.push(id);
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        let index = index.min(self.nodes[parent].children.len());
        self.nodes[parent].children.insert(index, child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = self.nodes[parent].children.iter().position(|&c| c == id)?;
        Some((parent, index))
    }

    /// Ancestors of `id` from its parent up to, not including, the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == self.root {
                break;
            }
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    /// Text nodes in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_text(self.root, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id].children {
            match self.nodes[child].kind {
                NodeKind::Text(_) => out.push(child),
                NodeKind::Element { .. } => self.collect_text(child, out),
            }
        }
    }

    pub fn text_len(&self) -> usize {
        self.text_nodes()
            .iter()
            .filter_map(|&id| self.text(id))
            .map(|t| t.chars().count())
            .sum()
    }

    pub fn text_content(&self) -> String {
        self.text_nodes()
            .iter()
            .filter_map(|&id| self.text(id))
            .collect()
    }

    pub fn text_runs(&self) -> Vec<TextRun<'_>> {
        let mut start = 0;
        let mut runs = Vec::new();
        for id in self.text_nodes() {
            let Some(text) = self.text(id) else { continue };
            let ancestors = self.ancestors(id);
            let block = ancestors.iter().copied().find(|&a| self.is_block(a));
            let tags = ancestors.iter().filter_map(|&a| self.tag(a)).collect();
            runs.push(TextRun {
                node: id,
                start,
                text,
                tags,
                block,
            });
            start += text.chars().count();
        }
        runs
    }

    /// Split a text node at a character offset. The original keeps the head;
    /// the returned node holds the tail and follows it.
    pub fn split_text(&mut self, id: NodeId, at: usize) -> Option<NodeId> {
        let text = self.text(id)?.to_string();
        let byte = text.char_indices().nth(at).map(|(b, _)| b)?;
        let (head, tail) = text.split_at(byte);
        let tail_id = self.create_text(tail);
        self.nodes[id].kind = NodeKind::Text(head.to_string());
        let (parent, index) = self.index_in_parent(id)?;
        self.insert_child(parent, index + 1, tail_id);
        Some(tail_id)
    }

    /// Put `id` inside a new `tag` element at its current position.
    pub fn wrap(&mut self, id: NodeId, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        let wrapper = self.create_element(tag, attributes);
        if let Some((parent, index)) = self.index_in_parent(id) {
            self.insert_child(parent, index, wrapper);
        }
        self.append_child(wrapper, id);
        wrapper
    }

    /// Wrap a contiguous run of siblings in a new `tag` element.
    pub fn wrap_siblings(&mut self, run: &[NodeId], tag: &str) -> Option<NodeId> {
        let first = *run.first()?;
        let (parent, index) = self.index_in_parent(first)?;
        let wrapper = self.create_element(tag, Vec::new());
        self.insert_child(parent, index, wrapper);
        for &id in run {
            self.append_child(wrapper, id);
        }
        Some(wrapper)
    }

    /// Replace an element by its children, then merge adjacent text.
    pub fn unwrap(&mut self, id: NodeId) {
        let Some((parent, index)) = self.index_in_parent(id) else {
            return;
        };
        let children = std::mem::take(&mut self.nodes[id].children);
        self.detach(id);
        for (offset, child) in children.into_iter().enumerate() {
            self.nodes[child].parent = None;
            self.insert_child(parent, index + offset, child);
        }
        self.release(id);
        self.merge_text(parent);
    }

    /// Change an element's tag, keeping its attributes and children.
    pub fn rename(&mut self, id: NodeId, new_tag: &str) {
        if let NodeKind::Element { tag, .. } = &mut self.nodes[id].kind {
            *tag = new_tag.to_ascii_lowercase();
        }
    }

    /// Merge adjacent text children of `parent` and drop empty ones.
    pub fn merge_text(&mut self, parent: NodeId) {
        let children = self.nodes[parent].children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        for child in children {
            let Some(text) = self.text(child).map(str::to_string) else {
                kept.push(child);
                continue;
            };
            if text.is_empty() {
                self.release(child);
                continue;
            }
            match kept.last().copied() {
                Some(prev) if self.text(prev).is_some() => {
                    if let NodeKind::Text(prev_text) = &mut self.nodes[prev].kind {
                        prev_text.push_str(&text);
                    }
                    self.release(child);
                }
                _ => kept.push(child),
            }
        }
        self.nodes[parent].children = kept;
    }

    /// Serialize the root's children.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &child in &self.nodes[self.root].children {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if is_void_tag(tag) {
                    return;
                }
                for &child in &self.nodes[id].children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
