//! Syntax tree produced by the [`Reader`](crate::Reader).
//!
//! Every variant carries its [`Range`] as a first-class field. Incomplete
//! variants are produced when the input ended (or a mismatched delimiter
//! appeared) before the closing delimiter; they keep everything gathered so
//! far so that editors can still work on a half-typed line.

use crate::span::Range;

/// An unquoted identifier such as `VerifyAccept` or `net/open`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub namespace: Option<String>,
    pub range: Range,
}

impl Symbol {
    /// Build a symbol from raw text, splitting `ns/name` when both halves are
    /// non-empty.
    pub fn from_text(text: &str, range: Range) -> Self {
        match text.split_once('/') {
            Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Self {
                name: name.to_string(),
                namespace: Some(ns.to_string()),
                range,
            },
            _ => Self {
                name: text.to_string(),
                namespace: None,
                range,
            },
        }
    }

    /// The symbol as written, namespace included.
    pub fn text(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// A quoted string literal with escapes already processed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub text: String,
    /// The quote character that opened (and, if complete, closed) the string.
    pub quote: char,
    pub range: Range,
}

/// Children of a parenthesised or bracketed form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    pub children: Vec<SyntaxNode>,
    pub range: Range,
}

/// A node standing in for input that could not be read.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    pub message: String,
    pub range: Range,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Symbol(Symbol),
    /// A symbol written with a leading `:`; the colon is not part of the name.
    Keyword(Symbol),
    String(StringLit),
    IncompleteString(StringLit),
    List(Seq),
    IncompleteList(Seq),
    Vector(Seq),
    IncompleteVector(Seq),
    Error(ErrorNode),
}

impl SyntaxNode {
    pub fn range(&self) -> Range {
        match self {
            Self::Symbol(s) | Self::Keyword(s) => s.range,
            Self::String(s) | Self::IncompleteString(s) => s.range,
            Self::List(s)
            | Self::IncompleteList(s)
            | Self::Vector(s)
            | Self::IncompleteVector(s) => s.range,
            Self::Error(e) => e.range,
        }
    }

    /// Children of list-like nodes; `None` for leaves.
    pub fn children(&self) -> Option<&[SyntaxNode]> {
        match self {
            Self::List(s)
            | Self::IncompleteList(s)
            | Self::Vector(s)
            | Self::IncompleteVector(s) => Some(&s.children),
            _ => None,
        }
    }

    #[inline]
    pub fn is_list_like(&self) -> bool {
        self.children().is_some()
    }

    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::IncompleteString(_) | Self::IncompleteList(_) | Self::IncompleteVector(_)
        )
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Plain text of an atom: symbol text, keyword name or string contents.
    ///
    /// This is how the execution path turns read forms into raw arguments.
    pub fn atom_text(&self) -> Option<String> {
        match self {
            Self::Symbol(s) => Some(s.text()),
            Self::Keyword(s) => Some(format!(":{}", s.text())),
            Self::String(s) | Self::IncompleteString(s) => Some(s.text.clone()),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Symbol(_) => "symbol",
            Self::Keyword(_) => "keyword",
            Self::String(_) => "string",
            Self::IncompleteString(_) => "incomplete string",
            Self::List(_) => "list",
            Self::IncompleteList(_) => "incomplete list",
            Self::Vector(_) => "vector",
            Self::IncompleteVector(_) => "incomplete vector",
            Self::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn r() -> Range {
        Range::new(Position::new(0, 0), Position::new(0, 3))
    }

    #[test]
    fn test_symbol_namespace_split() {
        let s = Symbol::from_text("net/open", r());
        assert_eq!(s.namespace.as_deref(), Some("net"));
        assert_eq!(s.name, "open");
        assert_eq!(s.text(), "net/open");
    }

    #[test]
    fn test_symbol_without_namespace() {
        for text in ["/", "a/", "/b", "plain"] {
            let s = Symbol::from_text(text, r());
            assert_eq!(s.namespace, None, "{text}");
            assert_eq!(s.name, text);
        }
    }

    #[test]
    fn test_children_only_for_sequences() {
        let list = SyntaxNode::IncompleteVector(Seq {
            children: vec![],
            range: r(),
        });
        assert!(list.is_list_like());
        assert!(list.is_incomplete());

        let sym = SyntaxNode::Symbol(Symbol::from_text("x", r()));
        assert!(sym.children().is_none());
        assert_eq!(sym.atom_text().as_deref(), Some("x"));
    }
}
