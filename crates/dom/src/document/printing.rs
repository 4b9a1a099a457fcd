//! HTML serialization for harness-side snapshot comparison.

use super::{Document, NodeKind};
use crate::NodeKey;

impl Document {
    /// Serialize a node and its subtree to an HTML string.
    ///
    /// Attributes print in name order so snapshots compare deterministically;
    /// text and attribute values are entity-escaped. Serializing the root
    /// prints its children only.
    pub fn serialize(&self, node: NodeKey) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeKey, out: &mut String) {
        let Some(data) = self.nodes.get(&node) else {
            return;
        };
        match &data.kind {
            NodeKind::Document => {
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text { text } => out.push_str(&escape_text(text)),
            NodeKind::Element { tag } => {
                out.push('<');
                out.push_str(tag);
                let mut pairs: Vec<(String, String)> = data.attrs.iter().cloned().collect();
                pairs.sort_by(|left, right| left.0.cmp(&right.0));
                for (name, value) in pairs {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    out.push_str(&escape_text(&value));
                    out.push('"');
                }
                out.push('>');
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Escape special HTML characters in text content.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for char_val in text.chars() {
        match char_val {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(char_val),
        }
    }
    out
}
