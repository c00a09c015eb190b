//! Node tree for compiled templates
//!
//! Nodes live in an arena owned by [`Tree`]; parents own their children by
//! [`NodeId`] and each child keeps a non-owning back-reference to its parent.
//! The set of node kinds is closed: see [`Node`].

pub mod attributes;
pub mod node;
pub mod tree;

pub use attributes::Attributes;
pub use node::{HtmlNode, JinjaNode, Node, TextNode};
pub use tree::{NodeId, Tree};
