//! Render Engine
//!
//! Walks the tree depth first and emits each node's opening line, its
//! children one level deeper, then its closing line. The root renders no lines
//! of its own, so top-level nodes start unindented.
//!
//! Three behaviors depend on more than the node itself:
//!
//! - Control tag chains. A control node's closing tag is suppressed when its
//!   next sibling extends it (`if` followed by `elif`/`else`, `for` followed by
//!   `else`). The node that does close the chain closes it with the tag of the
//!   chain's first node, giving one `{% endif %}` per `if/elif/else` run.
//! - Preformatted first child. An HTML node whose first child is preformatted
//!   text glues that text straight onto its opening tag.
//! - Condensing. A condensed HTML node is spliced onto its first and last
//!   child lines instead of taking lines of its own.

use crate::ast::{JinjaNode, Node, NodeId, Tree};

/// Render the whole tree into output lines.
pub fn render_lines(tree: &Tree, indent_unit: &str) -> Vec<String> {
    let engine = RenderEngine { tree, indent_unit };
    engine.children_lines(tree.root(), 0)
}

struct RenderEngine<'a> {
    tree: &'a Tree,
    indent_unit: &'a str,
}

impl RenderEngine<'_> {
    fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }

    /// Lines of every child of `id`, skipping a preformatted first child that
    /// the parent's opening line has already absorbed.
    fn children_lines(&self, id: NodeId, depth: usize) -> Vec<String> {
        let absorbed = self.absorbed_child(id);
        let mut lines = Vec::new();
        for &child in self.tree.children(id) {
            if Some(child) == absorbed {
                lines.extend(self.children_lines(child, depth + 1));
            } else {
                lines.extend(self.node_lines(child, depth));
            }
        }
        lines
    }

    fn node_lines(&self, id: NodeId, depth: usize) -> Vec<String> {
        let node = self.tree.node(id);
        let indent = match node {
            Node::Preformatted(_) => String::new(),
            _ => self.indent(depth),
        };
        let start = self.start_line(id);
        let end = self.end_line(id);
        let mut children = self.children_lines(id, depth + 1);

        if let Node::Html(html) = node {
            if html.condensed {
                let start = start.unwrap_or_default();
                let end = end.unwrap_or_default();
                let Some(first) = children.first_mut() else {
                    return vec![format!("{}{}{}", indent, start, end)];
                };
                let child_indent = self.indent(depth + 1);
                let first_content = first
                    .strip_prefix(child_indent.as_str())
                    .unwrap_or(first.as_str())
                    .to_string();
                *first = format!("{}{}{}", indent, start, first_content);
                if let Some(last) = children.last_mut() {
                    last.push_str(&end);
                }
                return children;
            }
        }

        let mut lines = Vec::with_capacity(children.len() + 2);
        if let Some(start) = start {
            lines.push(format!("{}{}", indent, start));
        }
        lines.append(&mut children);
        if let Some(end) = end {
            lines.push(format!("{}{}", indent, end));
        }
        lines
    }

    /// A preformatted first child of an HTML node. Blank placeholders left by
    /// continuations and empty lines do not count as the first child.
    fn absorbed_child(&self, id: NodeId) -> Option<NodeId> {
        if !matches!(self.tree.node(id), Node::Html(_)) {
            return None;
        }
        let first = self
            .tree
            .children(id)
            .iter()
            .copied()
            .find(|child| !matches!(self.tree.node(*child), Node::Empty))?;
        matches!(self.tree.node(first), Node::Preformatted(_)).then_some(first)
    }

    fn start_line(&self, id: NodeId) -> Option<String> {
        let mut start = self.tree.node(id).render_start()?;
        if let Some(child) = self.absorbed_child(id) {
            if let Some(text) = self.tree.node(child).as_text() {
                start.push_str(&text.data);
            }
        }
        Some(start)
    }

    fn end_line(&self, id: NodeId) -> Option<String> {
        match self.tree.node(id) {
            Node::Html(html) => Some(html.render_end()),
            Node::Jinja(jinja) => self.jinja_end(id, jinja),
            _ => None,
        }
    }

    fn jinja_end(&self, id: NodeId, jinja: &JinjaNode) -> Option<String> {
        let next = self.tree.next_sibling(id).and_then(|n| self.jinja(n));
        if next.is_some_and(|next| next.is_extending(jinja)) {
            return None;
        }

        // Walk back to the node that opened the chain.
        let mut root = jinja;
        let mut current = id;
        while let Some(previous) = self.tree.previous_sibling(current) {
            match self.jinja(previous) {
                Some(prev) if root.is_extending(prev) => {
                    root = prev;
                    current = previous;
                }
                _ => break,
            }
        }
        Some(JinjaNode::render_end_for(&root.tag))
    }

    fn jinja(&self, id: NodeId) -> Option<&JinjaNode> {
        self.tree.node(id).as_jinja()
    }
}
