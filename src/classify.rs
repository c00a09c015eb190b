//! Line Classification
//!
//! Turns one trimmed logical line into a node. The first character selects
//! the grammar:
//!
//! | Prefix      | Result                                   |
//! |-------------|------------------------------------------|
//! | (empty)     | `Empty`                                  |
//! | `.` / `#`   | HTML grammar with an implicit `%div`     |
//! | `%`         | HTML grammar                             |
//! | `-`         | control (Jinja) grammar                  |
//! | `\|`        | preformatted text                        |
//! | `/`         | HTML comment                             |
//! | anything    | plain text                               |
//!
//! Tag lines may carry a nested tag after a `: ` separator
//! (`%p: %span: %b bold`). The part before the separator is parsed by its own
//! grammar and the rest is classified again from scratch, so each separator
//! adds one level of nesting.

use crate::ast::{Attributes, HtmlNode, JinjaNode, Node, NodeId, Tree};
use crate::error::LineError;
use crate::grammar::{
    ATTRIBUTE_PAIR_REGEX, CLASS_SHORTHAND, HTML_COMMENT_PREFIX, HTML_TAG_PREFIX, HTML_TAG_REGEX,
    ID_SHORTHAND, IMPLICIT_TAG, JINJA_TAG_PREFIX, JINJA_TAG_REGEX, PREFORMATTED_PREFIX,
    SELF_CLOSING_HTML_TAGS, SELF_CLOSING_JINJA_TAGS,
};

/// Classify a trimmed line into a detached node (plus any inline children).
pub fn parse_line(tree: &mut Tree, line: &str) -> Result<NodeId, LineError> {
    let Some(first) = line.chars().next() else {
        return Ok(tree.create(Node::Empty));
    };

    let id = match first {
        CLASS_SHORTHAND | ID_SHORTHAND => {
            parse_html(tree, &format!("{}{}{}", HTML_TAG_PREFIX, IMPLICIT_TAG, line))?
        }
        HTML_TAG_PREFIX => parse_html(tree, line)?,
        JINJA_TAG_PREFIX => parse_jinja(tree, line)?,
        PREFORMATTED_PREFIX => tree.create(Node::preformatted(&line[1..])),
        HTML_COMMENT_PREFIX => tree.create(Node::html_comment(line[1..].trim())),
        _ => tree.create(Node::text(line)),
    };
    tracing::trace!(line, node_type = tree.node(id).node_type(), "classified line");
    Ok(id)
}

/// Where the nested-tag scan gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Stop at the first top-level whitespace; HTML inline content starts there.
    UntilWhitespace,
    /// Scan the whole line; control data may contain spaces.
    WholeLine,
}

/// Find the first `: ` separator outside quotes and brackets.
///
/// Returns the head before the colon and the rest after the whitespace.
fn split_nested(line: &str, scan: Scan) -> Option<(&str, &str)> {
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                if chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
                    return Some((&line[..i], line[i + 1..].trim_start()));
                }
            }
            c if c.is_whitespace() && depth == 0 && scan == Scan::UntilWhitespace => return None,
            _ => {}
        }
    }
    None
}

/// Parse `head`, classify `rest`, and hang the latter under the former.
fn parse_nested(
    tree: &mut Tree,
    head: &str,
    rest: &str,
    parse_head: fn(&mut Tree, &str) -> Result<NodeId, LineError>,
) -> Result<NodeId, LineError> {
    let parent = parse_head(tree, head)?;
    let child = parse_line(tree, rest)?;
    tree.add_child(parent, child)?;
    Ok(parent)
}

fn parse_html(tree: &mut Tree, line: &str) -> Result<NodeId, LineError> {
    match split_nested(line, Scan::UntilWhitespace) {
        Some((head, rest)) => parse_nested(tree, head, rest, parse_html_tag),
        None => parse_html_tag(tree, line),
    }
}

fn parse_jinja(tree: &mut Tree, line: &str) -> Result<NodeId, LineError> {
    match split_nested(line, Scan::WholeLine) {
        Some((head, rest)) => parse_nested(tree, head, rest, parse_jinja_tag),
        None => parse_jinja_tag(tree, line),
    }
}

fn parse_html_tag(tree: &mut Tree, line: &str) -> Result<NodeId, LineError> {
    let caps = HTML_TAG_REGEX
        .captures(line)
        .ok_or_else(|| LineError::NoMatch {
            grammar: "HTML",
            text: line.to_string(),
        })?;

    let tag = &caps["tag"];
    let mut attributes = Attributes::new();
    if let Some(shorthand) = caps.name("shorthand") {
        parse_shorthand(shorthand.as_str(), tag, &mut attributes)?;
    }
    if let Some(attrs) = caps.name("attrs") {
        parse_attributes(attrs.as_str(), tag, &mut attributes)?;
    }

    let mut html = HtmlNode::with_attributes(tag, attributes);
    html.condensed = caps.name("condensed").is_some();
    let node = if SELF_CLOSING_HTML_TAGS.contains(tag) {
        Node::SelfClosingHtml(html)
    } else {
        Node::Html(html)
    };

    let content = caps.name("content").map_or("", |m| m.as_str().trim());
    if !content.is_empty() && !node.children_allowed() {
        return Err(LineError::InlineContentNotAllowed {
            tag: tag.to_string(),
        });
    }

    let id = tree.create(node);
    if !content.is_empty() {
        let text = tree.create(Node::text(content));
        tree.add_child(id, text)?;
    }
    Ok(id)
}

/// Apply `.cls#id.other` chunks left to right.
fn parse_shorthand(shorthand: &str, tag: &str, attributes: &mut Attributes) -> Result<(), LineError> {
    let mut chunks: Vec<(char, String)> = Vec::new();
    for c in shorthand.chars() {
        if c == CLASS_SHORTHAND || c == ID_SHORTHAND {
            chunks.push((c, String::new()));
        } else if let Some((_, value)) = chunks.last_mut() {
            value.push(c);
        } else {
            return Err(LineError::MalformedShorthand(shorthand.to_string()));
        }
    }

    for (delimiter, value) in chunks {
        if value.is_empty() {
            return Err(LineError::MalformedShorthand(shorthand.to_string()));
        }
        let key = if delimiter == CLASS_SHORTHAND { "class" } else { "id" };
        attributes.add(key, &value, tag)?;
    }
    Ok(())
}

/// Parse `(key="value", other="with, commas")`.
fn parse_attributes(attrs: &str, tag: &str, attributes: &mut Attributes) -> Result<(), LineError> {
    let inner = attrs
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(attrs);
    let malformed = || LineError::MalformedAttributes(attrs.to_string());

    for pair in ATTRIBUTE_PAIR_REGEX.find_iter(inner) {
        let pair = pair.as_str();
        if pair.matches('"').count() != 2 {
            return Err(malformed());
        }
        let (key, value) = pair.split_once('=').ok_or_else(malformed)?;
        let value = value
            .trim()
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }
        attributes.add(key, value, tag)?;
    }
    Ok(())
}

fn parse_jinja_tag(tree: &mut Tree, line: &str) -> Result<NodeId, LineError> {
    let caps = JINJA_TAG_REGEX
        .captures(line)
        .ok_or_else(|| LineError::NoMatch {
            grammar: "Jinja",
            text: line.to_string(),
        })?;

    let tag = &caps["tag"];
    let data = caps.name("data").map_or("", |m| m.as_str().trim());
    let jinja = JinjaNode::new(tag, data);
    let node = if SELF_CLOSING_JINJA_TAGS.contains(tag) {
        Node::SelfClosingJinja(jinja)
    } else {
        Node::Jinja(jinja)
    };
    Ok(tree.create(node))
}
