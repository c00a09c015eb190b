//! HTML attribute map
//!
//! Keys are unique, except `class`, whose values accumulate space-separated.
//! Insertion order is kept so rendering is deterministic.

use crate::error::LineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, refusing to clobber anything but `class`.
    ///
    /// `tag` is only used to name the element in the error.
    pub fn add(&mut self, key: &str, value: &str, tag: &str) -> Result<(), LineError> {
        let value = value.trim();
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) if key == "class" => {
                let existing = &mut self.entries[index].1;
                *existing = format!("{} {}", existing, value).trim().to_string();
                Ok(())
            }
            Some(_) => Err(LineError::DuplicateAttribute {
                key: key.to_string(),
                tag: tag.to_string(),
            }),
            None => {
                self.entries.push((key.to_string(), value.to_string()));
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key="value"` pairs joined by single spaces; empty when there are none.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_attributes_only_allowed_for_class() {
        let mut attrs = Attributes::new();
        attrs.add("foo", "bar", "div").unwrap();
        assert_eq!(attrs.get("foo"), Some("bar"));

        let err = attrs.add("foo", "other", "div").unwrap_err();
        assert_eq!(
            err,
            LineError::DuplicateAttribute {
                key: "foo".into(),
                tag: "div".into()
            }
        );
        assert_eq!(attrs.get("foo"), Some("bar"));

        attrs.add("class", "cls1", "div").unwrap();
        attrs.add("class", "cls2", "div").unwrap();
        assert_eq!(attrs.get("class"), Some("cls1 cls2"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_render() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.render(), "");
        attrs.add("a", "1", "div").unwrap();
        attrs.add("b", "2", "div").unwrap();
        assert_eq!(attrs.render(), r#"a="1" b="2""#);
    }
}
