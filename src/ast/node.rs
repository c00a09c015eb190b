//! Node kinds
//!
//! Every node answers two questions: does it accept children, and what does
//! it render as on its own. Rendering that depends on neighbours (control tag
//! chains, preformatted first children, condensing) lives in
//! [`crate::render`].

use super::attributes::Attributes;
use crate::grammar::extends_tag;

/// Literal payload shared by the text-like kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub data: String,
}

impl TextNode {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlNode {
    pub tag: String,
    pub attributes: Attributes,
    /// Splice the open/close tags onto the first/last child line.
    pub condensed: bool,
}

impl HtmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            condensed: false,
        }
    }

    pub fn with_attributes(tag: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::new(tag)
        }
    }

    pub fn condensed(mut self) -> Self {
        self.condensed = true;
        self
    }

    fn tag_and_attributes(&self) -> String {
        format!("{} {}", self.tag, self.attributes.render())
            .trim()
            .to_string()
    }

    pub fn render_start(&self) -> String {
        format!("<{}>", self.tag_and_attributes())
    }

    pub fn render_self_closing(&self) -> String {
        format!("<{} />", self.tag_and_attributes())
    }

    pub fn render_end(&self) -> String {
        format!("</{}>", self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JinjaNode {
    pub tag: String,
    pub data: String,
}

impl JinjaNode {
    pub fn new(tag: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            data: data.into(),
        }
    }

    /// Whether this node continues the construct opened by `previous`.
    pub fn is_extending(&self, previous: &JinjaNode) -> bool {
        extends_tag(&self.tag, &previous.tag)
    }

    pub fn render_start(&self) -> String {
        if self.data.is_empty() {
            format!("{{% {} %}}", self.tag)
        } else {
            format!("{{% {} {} %}}", self.tag, self.data)
        }
    }

    /// Closing tag for a construct rooted at `tag`.
    pub fn render_end_for(tag: &str) -> String {
        format!("{{% end{} %}}", tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Synthetic root; renders nothing and wraps the top-level lines.
    Root,
    /// Blank logical line.
    Empty,
    Text(TextNode),
    /// Whitespace-sensitive text, rendered without indentation.
    Preformatted(TextNode),
    HtmlComment(TextNode),
    Html(HtmlNode),
    SelfClosingHtml(HtmlNode),
    Jinja(JinjaNode),
    SelfClosingJinja(JinjaNode),
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(TextNode::new(data))
    }

    pub fn preformatted(data: impl Into<String>) -> Self {
        Node::Preformatted(TextNode::new(data))
    }

    pub fn html_comment(data: impl Into<String>) -> Self {
        Node::HtmlComment(TextNode::new(data))
    }

    pub fn children_allowed(&self) -> bool {
        !matches!(
            self,
            Node::Empty | Node::HtmlComment(_) | Node::SelfClosingHtml(_) | Node::SelfClosingJinja(_)
        )
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Root => "Root",
            Node::Empty => "Empty",
            Node::Text(_) => "Text",
            Node::Preformatted(_) => "PreformattedText",
            Node::HtmlComment(_) => "HtmlComment",
            Node::Html(_) => "Html",
            Node::SelfClosingHtml(_) => "SelfClosingHtml",
            Node::Jinja(_) => "Jinja",
            Node::SelfClosingJinja(_) => "SelfClosingJinja",
        }
    }

    /// The HTML payload of either HTML kind.
    pub fn as_html(&self) -> Option<&HtmlNode> {
        match self {
            Node::Html(html) | Node::SelfClosingHtml(html) => Some(html),
            _ => None,
        }
    }

    /// The control payload of either control kind.
    pub fn as_jinja(&self) -> Option<&JinjaNode> {
        match self {
            Node::Jinja(jinja) | Node::SelfClosingJinja(jinja) => Some(jinja),
            _ => None,
        }
    }

    /// The payload of any text-like kind.
    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) | Node::Preformatted(text) | Node::HtmlComment(text) => Some(text),
            _ => None,
        }
    }

    /// The line this node renders as on its own, ignoring its neighbours.
    pub fn render_start(&self) -> Option<String> {
        match self {
            Node::Root | Node::Empty => None,
            Node::Text(text) | Node::Preformatted(text) => Some(text.data.clone()),
            Node::HtmlComment(text) => Some(format!("<!-- {} -->", text.data.trim())),
            Node::Html(html) => Some(html.render_start()),
            Node::SelfClosingHtml(html) => Some(html.render_self_closing()),
            Node::Jinja(jinja) | Node::SelfClosingJinja(jinja) => Some(jinja.render_start()),
        }
    }
}
