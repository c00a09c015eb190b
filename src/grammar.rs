//! Grammar Definitions
//!
//! Process-wide, immutable tables that drive line classification: the prefix
//! characters, the line regexes, the tag names forced into self-closing
//! variants, and the control-tag extension families.
//!
//! # HTML line
//!
//! ```text
//! %[-]tag[.cls|#id ...][(key="value", ...)][ inline content]
//! ```
//!
//! # Control line
//!
//! ```text
//! -tag[ data]
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

pub const LINE_CONTINUATION: char = '\\';
pub const LINE_COMMENT: char = ';';
pub const HTML_TAG_PREFIX: char = '%';
pub const JINJA_TAG_PREFIX: char = '-';
pub const PREFORMATTED_PREFIX: char = '|';
pub const HTML_COMMENT_PREFIX: char = '/';
pub const CLASS_SHORTHAND: char = '.';
pub const ID_SHORTHAND: char = '#';

/// Tag used when a line starts straight with `.class` or `#id`.
pub const IMPLICIT_TAG: &str = "div";

/// `%tag` lines. The attribute group only accepts parentheses outside of
/// double-quoted values, so `(title="a) b")` stays in one piece.
pub static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^%",
        r"(?P<condensed>-)?",
        r"(?P<tag>\w+)",
        r"(?P<shorthand>[.#][^()\s]+)?",
        r#"(?P<attrs>\((?:[^()"]|"[^"]*")*\))?"#,
        r"(?P<content>\s+.+)?",
        r"$",
    ))
    .unwrap()
});

/// `-tag data` lines.
pub static JINJA_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-(?P<tag>\w+)(?P<data>\s+.+)?$").unwrap());

/// Splits an attribute list on commas that are not inside double quotes.
pub static ATTRIBUTE_PAIR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:[^,"]|"[^"]*")+"#).unwrap());

/// `#{name}` inline variable shorthand.
pub static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\{\s*(?P<expr>[^{}]+?)\s*\}").unwrap());

/// Void elements: always rendered as `<tag />` and never given children.
pub static SELF_CLOSING_HTML_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["br", "hr", "img", "input", "link", "meta"].into_iter().collect());

/// Control directives without a body.
pub static SELF_CLOSING_JINJA_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break", "continue", "do", "extends", "from", "import", "include", "set",
    ]
    .into_iter()
    .collect()
});

/// Maps a control tag to the tags that may directly follow it as a sibling
/// and continue the same construct.
pub static EXTENDING_TAGS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut families: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        families.insert("if", &["else", "elif"]);
        families.insert("elif", &["elif", "else"]);
        families.insert("for", &["else"]);
        families.insert("trans", &["pluralize"]);
        families
    });

/// Whether `tag` may directly follow a sibling tagged `extended`.
pub fn extends_tag(tag: &str, extended: &str) -> bool {
    EXTENDING_TAGS
        .get(extended)
        .is_some_and(|family| family.contains(&tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_regex_captures_every_group() {
        let caps = HTML_TAG_REGEX
            .captures(r#"%-a.link#home(href="/", title="x") Home"#)
            .unwrap();
        assert!(caps.name("condensed").is_some());
        assert_eq!(&caps["tag"], "a");
        assert_eq!(&caps["shorthand"], ".link#home");
        assert_eq!(&caps["attrs"], r#"(href="/", title="x")"#);
        assert_eq!(caps["content"].trim(), "Home");
    }

    #[test]
    fn test_html_regex_keeps_parens_inside_quotes() {
        let caps = HTML_TAG_REGEX.captures(r#"%p(title="a) b")"#).unwrap();
        assert_eq!(&caps["attrs"], r#"(title="a) b")"#);
        assert!(caps.name("content").is_none());
    }

    #[test]
    fn test_html_regex_rejects_garbage() {
        assert!(HTML_TAG_REGEX.captures("%%%%...####").is_none());
    }

    #[test]
    fn test_jinja_regex() {
        let caps = JINJA_TAG_REGEX.captures("-for x in xs").unwrap();
        assert_eq!(&caps["tag"], "for");
        assert_eq!(caps["data"].trim(), "x in xs");
        assert!(JINJA_TAG_REGEX.captures("-.....").is_none());
    }

    #[test]
    fn test_extension_families() {
        assert!(extends_tag("elif", "if"));
        assert!(extends_tag("else", "elif"));
        assert!(extends_tag("else", "for"));
        assert!(!extends_tag("elif", "for"));
        assert!(!extends_tag("if", "if"));
        assert!(!extends_tag("else", "block"));
    }
}
