//! Minimal DOM document for script-driven fixture pages.
//!
//! This crate centralizes the node tree, lookup indices, and the update
//! vocabulary shared by the fixture renderers. Every mutation is expressed as
//! a [`DOMUpdate`] batch applied by the [`Document`], so the sequence of
//! changes a fixture performs stays observable and deterministic.

pub mod document;
pub use document::{DOMNode, Document, NodeKind};

/// A 64-bit stable key for DOM nodes used to correlate updates with tree state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The root node key (always present).
    pub const ROOT: NodeKey = NodeKey(0);
}

/// A batchable update applied to the document.
///
/// Inserting a key that is already attached reparents that node; `pos` values
/// past the end of the child list append.
#[derive(Debug, Clone)]
pub enum DOMUpdate {
    InsertElement {
        parent: NodeKey,
        node: NodeKey,
        tag: String,
        pos: usize,
    },
    InsertText {
        parent: NodeKey,
        node: NodeKey,
        text: String,
        pos: usize,
    },
    SetAttr {
        node: NodeKey,
        name: String,
        value: String,
    },
    RemoveNode {
        node: NodeKey,
    },
}
