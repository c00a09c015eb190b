//! Tree Snapshot - a normalized, serializable view of a node tree
//!
//! One canonical traversal builds a [`NodeSnapshot`] for the whole tree, so
//! debugging output (JSON today) never re-implements tree walking.

use crate::ast::{Node, NodeId, Tree};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// The node kind, e.g. "Html" or "SelfClosingJinja"
    pub node_type: String,
    /// Tag name or text payload
    pub label: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Snapshot the tree starting at its root.
pub fn snapshot_tree(tree: &Tree) -> NodeSnapshot {
    snapshot_node(tree, tree.root())
}

pub fn snapshot_node(tree: &Tree, id: NodeId) -> NodeSnapshot {
    let node = tree.node(id);
    let mut attributes = BTreeMap::new();
    let label = match node {
        Node::Root | Node::Empty => String::new(),
        Node::Text(text) | Node::Preformatted(text) | Node::HtmlComment(text) => text.data.clone(),
        Node::Html(html) | Node::SelfClosingHtml(html) => {
            for (key, value) in html.attributes.iter() {
                attributes.insert(key.to_string(), value.to_string());
            }
            if html.condensed {
                attributes.insert("condensed".to_string(), "true".to_string());
            }
            html.tag.clone()
        }
        Node::Jinja(jinja) | Node::SelfClosingJinja(jinja) => {
            if !jinja.data.is_empty() {
                attributes.insert("data".to_string(), jinja.data.clone());
            }
            jinja.tag.clone()
        }
    };

    NodeSnapshot {
        node_type: node.node_type().to_string(),
        label,
        attributes,
        children: tree
            .children(id)
            .iter()
            .map(|child| snapshot_node(tree, *child))
            .collect(),
    }
}

/// Pretty-printed JSON of the whole tree.
pub fn to_json(tree: &Tree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&snapshot_tree(tree))
}
