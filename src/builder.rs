//! Tree Builder
//!
//! Assembles the node tree from the logical lines in a single pass.
//!
//! Two parallel stacks are kept: indentation widths and the nodes opened at
//! those widths, both seeded with the synthetic root at width -1. For each
//! non-blank line:
//!
//! 1. A width greater than the top of the stack descends one level.
//! 2. Otherwise both stacks are popped while the width is smaller than the
//!    top, then the node stack is popped once more to return to the parent.
//! 3. The top width must now equal the line's width, or the unindent matches
//!    no outer level.
//! 4. The node is attached to the node on top of the stack and pushed.
//!
//! Absolute widths never matter, only how they order against the ancestors'.

use crate::ast::{Node, NodeId, Tree};
use crate::classify::parse_line;
use crate::error::{LineError, TemplateError};
use crate::normalize::source_lines;

/// Width of the leading whitespace run.
///
/// A run mixing tabs and spaces is rejected.
pub fn indent_level(line: &str) -> Result<usize, LineError> {
    let whitespace: Vec<char> = line.chars().take_while(|c| c.is_whitespace()).collect();
    if whitespace.contains(&' ') && whitespace.contains(&'\t') {
        return Err(LineError::MixedIndentation);
    }
    Ok(whitespace.len())
}

/// Normalize `source` and build its node tree.
pub fn build_tree(source: &str) -> Result<Tree, TemplateError> {
    let lines = source_lines(source)?;
    build_tree_from_lines(&lines)
}

/// Build a node tree from already-normalized logical lines.
pub fn build_tree_from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Tree, TemplateError> {
    let mut tree = Tree::new();
    let mut indent_stack: Vec<isize> = vec![-1];
    let mut node_stack: Vec<NodeId> = vec![tree.root()];

    for (line_number, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let node = parse_line(&mut tree, line.trim())
            .map_err(|e| TemplateError::from_line_error(line_number, e))?;

        if matches!(tree.node(node), Node::Empty) {
            // Blank lines carry no indentation; they sit under the innermost
            // node that can hold them.
            let holder = node_stack
                .iter()
                .rev()
                .copied()
                .find(|id| tree.node(*id).children_allowed())
                .unwrap_or(tree.root());
            tree.add_child(holder, node)
                .map_err(|e| TemplateError::from_line_error(line_number, e))?;
            continue;
        }

        let indent = indent_level(line)
            .map_err(|e| TemplateError::from_line_error(line_number, e))? as isize;

        if indent > top(&indent_stack) {
            indent_stack.push(indent);
        } else {
            while indent < top(&indent_stack) {
                indent_stack.pop();
                node_stack.pop();
            }
            node_stack.pop();
        }

        if indent != top(&indent_stack) {
            return Err(TemplateError::indentation(
                line_number,
                "Unindent does not match any outer indentation level",
            ));
        }

        let parent = node_stack.last().copied().unwrap_or(tree.root());
        tree.add_child(parent, node)
            .map_err(|e| TemplateError::from_line_error(line_number, e))?;
        node_stack.push(node);
    }

    tracing::debug!(lines = lines.len(), nodes = tree.len(), "built node tree");
    Ok(tree)
}

fn top(stack: &[isize]) -> isize {
    stack.last().copied().unwrap_or(-1)
}
