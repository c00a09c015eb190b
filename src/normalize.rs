//! Line Normalization
//!
//! Turns raw template source into the sequence of logical lines the tree
//! builder consumes. Three things happen here:
//!
//! 1. Lines ending in `\` are merged with the following line(s).
//! 2. `;` comment lines are blanked; inside a continuation they are skipped
//!    and the run stays open.
//! 3. `#{name}` is rewritten to `{{ name }}`.
//!
//! The output stays index-aligned with the physical source: every merged run
//! of N physical lines yields one logical line followed by N-1 empty ones, so
//! line numbers in later errors still point at the source.

use crate::error::TemplateError;
use crate::grammar::{LINE_COMMENT, LINE_CONTINUATION, VARIABLE_REGEX};

/// Split `source` into logical lines.
///
/// An empty source produces exactly one empty line. A template that ends in
/// the middle of a continuation is a syntax error.
pub fn source_lines(source: &str) -> Result<Vec<String>, TemplateError> {
    let physical: Vec<&str> = source.trim_end().split('\n').collect();
    let mut lines = Vec::with_capacity(physical.len());
    let mut continued: Vec<String> = Vec::new();
    // Physical lines consumed by the open continuation, comments included.
    let mut run_length = 0usize;

    for raw in &physical {
        if is_comment(raw) {
            // A comment inside a continuation keeps the run open.
            if continued.is_empty() {
                lines.push(String::new());
            } else {
                run_length += 1;
            }
            continue;
        }

        let line = raw.trim_end();
        if let Some(head) = line.strip_suffix(LINE_CONTINUATION) {
            // The first piece keeps its indentation, the rest are re-flowed.
            let piece = if continued.is_empty() {
                head.trim_end()
            } else {
                head.trim()
            };
            continued.push(piece.to_string());
            run_length += 1;
        } else if !continued.is_empty() {
            continued.push(line.trim().to_string());
            lines.push(expand_variables(&continued.join(" ")));
            lines.extend(std::iter::repeat(String::new()).take(run_length));
            continued.clear();
            run_length = 0;
        } else {
            lines.push(expand_variables(line));
        }
    }

    if !continued.is_empty() {
        return Err(TemplateError::syntax(
            physical.len() - 1,
            "Line continuation at the end of the template",
        ));
    }

    tracing::debug!(
        physical = physical.len(),
        logical = lines.len(),
        "normalized source lines"
    );
    Ok(lines)
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(LINE_COMMENT)
}

/// Rewrite every `#{expr}` in `line` to `{{ expr }}`.
pub fn expand_variables(line: &str) -> String {
    VARIABLE_REGEX.replace_all(line, "{{ $expr }}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(source_lines("").unwrap(), vec![""]);
        assert_eq!(source_lines("\n").unwrap(), vec![""]);
        assert_eq!(source_lines("   \n\n").unwrap(), vec![""]);
    }

    #[test]
    fn test_basic() {
        let source = "%div\n  text\n%p\n  %p\n    nested-text\n";
        assert_eq!(
            source_lines(source).unwrap(),
            vec!["%div", "  text", "%p", "  %p", "    nested-text"]
        );
    }

    #[test]
    fn test_trailing_whitespace() {
        assert_eq!(source_lines("%div     ").unwrap(), vec!["%div"]);
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(source_lines("%div\r\n  a\r\n").unwrap(), vec!["%div", "  a"]);
    }

    #[test]
    fn test_comment() {
        let source = "%div\n; comment\n  text\n";
        assert_eq!(source_lines(source).unwrap(), vec!["%div", "", "  text"]);
    }

    #[test]
    fn test_indented_comment() {
        let source = "%div\n  ; comment\n  text\n";
        assert_eq!(source_lines(source).unwrap(), vec!["%div", "", "  text"]);
    }

    #[test]
    fn test_line_continuation() {
        let source = "%div(a=\"1\", \\\n     b=\"2\")\n  text\n";
        assert_eq!(
            source_lines(source).unwrap(),
            vec!["%div(a=\"1\", b=\"2\")", "", "  text"]
        );
    }

    #[test]
    fn test_line_continuation_over_three_lines() {
        let source = "%div(a=\"1\", \\\n  b=\"2\", \\\n  c=\"3\")\n%p";
        assert_eq!(
            source_lines(source).unwrap(),
            vec!["%div(a=\"1\", b=\"2\", c=\"3\")", "", "", "%p"]
        );
    }

    #[test]
    fn test_comment_inside_line_continuation() {
        let source = "%div(a=\"1\", \\\n  ; b is next\n  b=\"2\")\n%p";
        assert_eq!(
            source_lines(source).unwrap(),
            vec!["%div(a=\"1\", b=\"2\")", "", "", "%p"]
        );
    }

    #[test]
    fn test_comment_cannot_close_a_continuation() {
        let error = source_lines("%div(a=\"1\", \\\n; trailing note").unwrap_err();
        assert!(!error.is_indentation());
        assert_eq!(error.line(), 1);
    }

    #[test]
    fn test_line_continuation_ending_prematurely() {
        let error = source_lines("%div(a=\"1\", \\ \n").unwrap_err();
        assert!(!error.is_indentation());
        assert_eq!(error.line(), 0);
    }

    #[test]
    fn test_line_continuation_indented_properly() {
        let source = "%div\n  %p(a=\"1\", \\ \n     b=\"2\")\n    Text\n";
        assert_eq!(
            source_lines(source).unwrap(),
            vec!["%div", "  %p(a=\"1\", b=\"2\")", "", "    Text"]
        );
    }

    #[test]
    fn test_jinja_variables() {
        assert_eq!(
            source_lines("#{var} #{var2}").unwrap(),
            vec!["{{ var }} {{ var2 }}"]
        );
        assert_eq!(
            source_lines("%hr(class=\"#{class}\")").unwrap(),
            vec!["%hr(class=\"{{ class }}\")"]
        );
    }

    #[test]
    fn test_variable_whitespace_is_normalized() {
        assert_eq!(expand_variables("#{ user.name }"), "{{ user.name }}");
    }
}
