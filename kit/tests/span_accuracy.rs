//! Range Accuracy Tests
//!
//! Verifies that every node the reader produces carries the exact inclusive
//! line/column range of its source text, including nodes cut short by the end
//! of input.

use rvt::{Position, Range, SyntaxNode, read};

/// Text covered by an inclusive range.
fn slice(source: &str, range: Range) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut out = String::new();
    for line in range.start.line..=range.end.line {
        let chars: Vec<char> = lines[line].chars().collect();
        let from = if line == range.start.line { range.start.col } else { 0 };
        let to = if line == range.end.line {
            range.end.col + 1
        } else {
            chars.len()
        };
        out.extend(&chars[from..to.min(chars.len())]);
        if line != range.end.line {
            out.push('\n');
        }
    }
    out
}

/// Helper to assert the exact text and start of a node
fn assert_range(
    node: &SyntaxNode,
    source: &str,
    expected_text: &str,
    expected_start: (usize, usize),
) {
    let range = node.range();
    let actual_text = slice(source, range);

    assert_eq!(
        actual_text, expected_text,
        "range text mismatch at {}: expected {:?}, got {:?}",
        range, expected_text, actual_text
    );
    assert_eq!(
        range.start,
        Position::from(expected_start),
        "range start mismatch: expected {:?}, got {}",
        expected_start,
        range.start
    );
}

fn root(source: &str) -> SyntaxNode {
    read(source).node.unwrap()
}

fn child(node: &SyntaxNode, idx: usize) -> &SyntaxNode {
    &node.children().unwrap()[idx]
}

mod atom_range_tests {
    use super::*;

    #[test]
    fn range_single_symbol() {
        let source = "VerifyAccept";
        assert_range(&root(source), source, "VerifyAccept", (0, 0));
    }

    #[test]
    fn range_symbol_after_whitespace() {
        let source = "  \t foo  ";
        assert_range(&root(source), source, "foo", (0, 4));
    }

    #[test]
    fn range_keyword_includes_colon() {
        let source = ":bar";
        let node = root(source);
        assert!(matches!(&node, SyntaxNode::Keyword(k) if k.name == "bar"));
        assert_range(&node, source, ":bar", (0, 0));
    }

    #[test]
    fn range_string_includes_quotes() {
        let source = r#""a \"b\"""#;
        let node = root(source);
        assert_range(&node, source, source, (0, 0));
        assert!(matches!(&node, SyntaxNode::String(s) if s.text == "a \"b\""));
    }

    #[test]
    fn range_namespaced_symbol() {
        let source = "net/open";
        assert_range(&root(source), source, "net/open", (0, 0));
    }
}

mod seq_range_tests {
    use super::*;

    #[test]
    fn range_list_and_children() {
        let source = "(foo 1 2)";
        let node = root(source);

        // (foo(1..3) 1(5) 2(7))
        assert_range(&node, source, "(foo 1 2)", (0, 0));
        assert_range(child(&node, 0), source, "foo", (0, 1));
        assert_range(child(&node, 1), source, "1", (0, 5));
        assert_range(child(&node, 2), source, "2", (0, 7));
    }

    #[test]
    fn range_nested_vector() {
        let source = "(a [b, c] d)";
        let node = root(source);
        let vector = child(&node, 1);

        assert!(matches!(vector, SyntaxNode::Vector(_)));
        assert_range(vector, source, "[b, c]", (0, 3));
        assert_range(child(vector, 1), source, "c", (0, 7));
        assert_range(child(&node, 2), source, "d", (0, 10));
    }

    #[test]
    fn range_empty_list() {
        let source = " () ";
        assert_range(&root(source), source, "()", (0, 1));
    }
}

mod incomplete_range_tests {
    use super::*;

    #[test]
    fn range_unclosed_list_runs_to_end() {
        let source = "(foo";
        let node = root(source);

        assert!(matches!(node, SyntaxNode::IncompleteList(_)));
        assert_range(&node, source, "(foo", (0, 0));
        assert_range(child(&node, 0), source, "foo", (0, 1));
    }

    #[test]
    fn range_unclosed_list_covers_trailing_space() {
        let source = "(foo  ";
        assert_range(&root(source), source, "(foo  ", (0, 0));
    }

    #[test]
    fn range_unclosed_string() {
        let source = "(open \"fi";
        let node = root(source);
        let string = child(&node, 1);

        assert!(matches!(string, SyntaxNode::IncompleteString(s) if s.text == "fi"));
        assert_range(string, source, "\"fi", (0, 6));
    }
}

mod multiline_range_tests {
    use super::*;

    #[test]
    fn range_list_across_lines() {
        let source = "(open\n  \"file\"\n  :ro)";
        let node = root(source);

        assert_range(&node, source, source, (0, 0));
        assert_range(child(&node, 1), source, "\"file\"", (1, 2));
        assert_range(child(&node, 2), source, ":ro", (2, 2));
        assert_eq!(node.range().end, Position::new(2, 5));
        assert!(!node.range().is_single_line());
    }
}
