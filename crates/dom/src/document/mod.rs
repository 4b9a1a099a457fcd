//! The document tree, its lookup indices, and the update application path.

mod printing;

use anyhow::{Error, bail};
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::{DOMUpdate, NodeKey};

/// The kind of payload a node carries.
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

/// Node payload stored in the document.
#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

/// An in-memory DOM document addressed by stable [`NodeKey`] handles.
///
/// [`Document::apply`] is the only mutation path; the public helpers build
/// update batches and feed them through it.
#[derive(Debug)]
pub struct Document {
    nodes: HashMap<NodeKey, DOMNode>,
    children_by_parent: HashMap<NodeKey, Vec<NodeKey>>,
    parent_by_child: HashMap<NodeKey, NodeKey>,
    id_index: HashMap<String, NodeKey>,
    /// Nodes minted but not yet attached; they enter the tree on append.
    created: HashMap<NodeKey, NodeKind>,
    next_key: u64,
}

impl Document {
    /// Create a document containing only the root node.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeKey::ROOT, DOMNode::default());
        Self {
            nodes,
            children_by_parent: HashMap::new(),
            parent_by_child: HashMap::new(),
            id_index: HashMap::new(),
            created: HashMap::new(),
            next_key: 1,
        }
    }

    fn mint_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    /// Create an element and insert it under the root at the end; a later
    /// append reparents it to its real position.
    ///
    /// # Errors
    /// Returns an error if the insertion batch is rejected.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeKey, Error> {
        let node = self.mint_key();
        self.apply(vec![DOMUpdate::InsertElement {
            parent: NodeKey::ROOT,
            node,
            tag: tag.to_owned(),
            pos: usize::MAX,
        }])?;
        Ok(node)
    }

    /// Create a detached text node; it enters the tree when appended.
    pub fn create_text(&mut self, text: &str) -> NodeKey {
        let node = self.mint_key();
        self.created.insert(
            node,
            NodeKind::Text {
                text: text.to_owned(),
            },
        );
        node
    }

    /// Insert or reparent `child` under `parent` at `pos`.
    ///
    /// # Errors
    /// Returns an error for an unknown child or parent.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey, pos: usize) -> Result<(), Error> {
        let kind = if let Some(pending) = self.created.get(&child) {
            pending.clone()
        } else if let Some(data) = self.nodes.get(&child) {
            data.kind.clone()
        } else {
            bail!("unknown child node {child:?}; create it via the document first");
        };
        let update = match kind {
            NodeKind::Element { tag } => DOMUpdate::InsertElement {
                parent,
                node: child,
                tag,
                pos,
            },
            NodeKind::Text { text } => DOMUpdate::InsertText {
                parent,
                node: child,
                text,
                pos,
            },
            NodeKind::Document => bail!("cannot append the document root"),
        };
        self.apply(vec![update])
    }

    /// Write an attribute on an attached node.
    ///
    /// # Errors
    /// Returns an error if the node is not in the tree.
    pub fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> Result<(), Error> {
        self.apply(vec![DOMUpdate::SetAttr {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        }])
    }

    /// Overwrite a node's content: remove all current children, then insert a
    /// single text node at position 0.
    ///
    /// # Errors
    /// Returns an error if the node is not in the tree.
    pub fn set_text_content(&mut self, node: NodeKey, text: &str) -> Result<(), Error> {
        if !self.nodes.contains_key(&node) {
            bail!("unknown node {node:?} for text content");
        }
        let mut batch: Vec<DOMUpdate> = self
            .children(node)
            .iter()
            .map(|child| DOMUpdate::RemoveNode { node: *child })
            .collect();
        let text_node = self.mint_key();
        batch.push(DOMUpdate::InsertText {
            parent: node,
            node: text_node,
            text: text.to_owned(),
            pos: 0,
        });
        self.apply(batch)
    }

    /// Remove a node and its subtree.
    ///
    /// # Errors
    /// Returns an error if the batch is rejected.
    pub fn remove(&mut self, node: NodeKey) -> Result<(), Error> {
        self.apply(vec![DOMUpdate::RemoveNode { node }])
    }

    /// Apply a batch of updates in order. The only way document state changes.
    ///
    /// # Errors
    /// Returns an error on the first update naming an unknown node.
    pub fn apply(&mut self, batch: Vec<DOMUpdate>) -> Result<(), Error> {
        for update in batch {
            self.apply_update(update)?;
        }
        Ok(())
    }

    fn apply_update(&mut self, update: DOMUpdate) -> Result<(), Error> {
        match update {
            DOMUpdate::InsertElement {
                parent,
                node,
                tag,
                pos,
            } => self.insert(parent, node, NodeKind::Element { tag }, pos),
            DOMUpdate::InsertText {
                parent,
                node,
                text,
                pos,
            } => self.insert(parent, node, NodeKind::Text { text }, pos),
            DOMUpdate::SetAttr { node, name, value } => self.set_attr(node, &name, value),
            DOMUpdate::RemoveNode { node } => {
                self.remove_recursively(node);
                Ok(())
            }
        }
    }

    fn insert(&mut self, parent: NodeKey, node: NodeKey, kind: NodeKind, pos: usize) -> Result<(), Error> {
        if node == NodeKey::ROOT {
            bail!("cannot insert the document root");
        }
        if !self.nodes.contains_key(&parent) {
            bail!("unknown parent node {parent:?}");
        }
        self.created.remove(&node);
        // Keep minted keys ahead of externally supplied ones.
        self.next_key = self.next_key.max(node.0.wrapping_add(1));
        // Detach first so an insert of an attached key is a reparent.
        if let Some(old_parent) = self.parent_by_child.remove(&node) {
            if let Some(list) = self.children_by_parent.get_mut(&old_parent) {
                list.retain(|key| *key != node);
            }
        }
        let data = self.nodes.entry(node).or_default();
        data.kind = kind;
        let children = self.children_by_parent.entry(parent).or_default();
        let at = pos.min(children.len());
        children.insert(at, node);
        self.parent_by_child.insert(node, parent);
        Ok(())
    }

    fn set_attr(&mut self, node: NodeKey, name: &str, value: String) -> Result<(), Error> {
        let Some(data) = self.nodes.get_mut(&node) else {
            bail!("unknown node {node:?} for attribute {name}");
        };
        if let Some(slot) = data.attrs.iter_mut().find(|(attr, _)| attr == name) {
            slot.1 = value.clone();
        } else {
            data.attrs.push((name.to_owned(), value.clone()));
        }
        if name.eq_ignore_ascii_case("id") {
            // Last write wins; stale mappings to this node are dropped.
            self.id_index.retain(|_, mapped| *mapped != node);
            if !value.is_empty() {
                self.id_index.insert(value, node);
            }
        }
        Ok(())
    }

    fn remove_recursively(&mut self, node: NodeKey) {
        if let Some(children) = self.children_by_parent.remove(&node) {
            for child in children {
                self.remove_recursively(child);
            }
        }
        if let Some(parent) = self.parent_by_child.remove(&node) {
            if let Some(list) = self.children_by_parent.get_mut(&parent) {
                list.retain(|key| *key != node);
            }
        }
        self.id_index.retain(|_, mapped| *mapped != node);
        self.nodes.remove(&node);
    }

    /// Return the element with the given id (case-sensitive, per HTML).
    pub fn element_by_id(&self, id: &str) -> Option<NodeKey> {
        self.id_index.get(id).copied()
    }

    /// Return the first element with the given tag name, in document order.
    pub fn first_element_by_tag(&self, tag: &str) -> Option<NodeKey> {
        self.find_by_tag(NodeKey::ROOT, tag)
    }

    fn find_by_tag(&self, node: NodeKey, needle: &str) -> Option<NodeKey> {
        if let Some(NodeKind::Element { tag }) = self.nodes.get(&node).map(|data| &data.kind) {
            if tag.eq_ignore_ascii_case(needle) {
                return Some(node);
            }
        }
        self.children(node)
            .iter()
            .find_map(|child| self.find_by_tag(*child, needle))
    }

    /// The node's children in document order (empty for leaves and unknown keys).
    pub fn children(&self, node: NodeKey) -> &[NodeKey] {
        self.children_by_parent
            .get(&node)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// The tag name of an element node.
    pub fn tag_name(&self, node: NodeKey) -> Option<&str> {
        match &self.nodes.get(&node)?.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    /// The current value of an attribute (names compare case-insensitively).
    pub fn attribute(&self, node: NodeKey, name: &str) -> Option<String> {
        self.nodes
            .get(&node)?
            .attrs
            .iter()
            .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    /// Concatenated text of the node and all of its descendants.
    pub fn text_content(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeKey, out: &mut String) {
        if let Some(NodeKind::Text { text }) = self.nodes.get(&node).map(|data| &data.kind) {
            out.push_str(text);
        }
        for child in self.children(node) {
            self.collect_text(*child, out);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
