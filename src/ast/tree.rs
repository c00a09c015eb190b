//! Arena-backed node tree
//!
//! All nodes of one template live in a single `Vec`. A node is created
//! detached and becomes part of the tree when it is attached to a parent.
//! Attachment happens at most once per node: re-parenting is an error, not a
//! move.

use super::node::Node;
use crate::error::LineError;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    /// Position in the parent's child list, valid once attached.
    index: usize,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Tree {
    /// A tree holding only the synthetic root.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                node: Node::Root,
                parent: None,
                index: 0,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Store a detached node and return its id.
    pub fn create(&mut self, node: Node) -> NodeId {
        self.entries.push(Entry {
            node,
            parent: None,
            index: 0,
            children: Vec::new(),
        });
        NodeId(self.entries.len() - 1)
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LineError> {
        let parent_node = &self.entries[parent.0].node;
        if !parent_node.children_allowed() {
            return Err(LineError::ChildrenNotAllowed {
                node_type: parent_node.node_type(),
            });
        }
        if self.entries[child.0].parent.is_some() || child == self.root() || child == parent {
            return Err(LineError::AlreadyParented);
        }

        let index = self.entries[parent.0].children.len();
        self.entries[parent.0].children.push(child);
        let entry = &mut self.entries[child.0];
        entry.parent = Some(parent);
        entry.index = index;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.entries[id.0].children.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.0].parent
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let entry = &self.entries[id.0];
        let parent = entry.parent?;
        let index = entry.index.checked_sub(1)?;
        self.children(parent).get(index).copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let entry = &self.entries[id.0];
        let parent = entry.parent?;
        self.children(parent).get(entry.index + 1).copied()
    }

    /// Number of ancestors between `id` and the root; top-level nodes are at 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.parent(id)?;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Total number of nodes, including the root and any detached ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
