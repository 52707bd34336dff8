//! Line autocomplete.
//!
//! The editor sends the current line and the cursor. The line is read the
//! same way steps are, the node under the cursor is located, and the answer
//! depends on which slot of the call it sits in: the head gets block names,
//! later slots get the shapes the block's overloads expect there.

use rvt_core::{Depth, Position, Range, SyntaxNode, locate};

use crate::registry::Registry;
use crate::step::read_call;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub candidates: Vec<String>,
    /// Text the chosen candidate replaces; `None` inserts at the cursor.
    pub replace: Option<Range>,
    pub context: CompletionContext,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    BlockName,
    Argument {
        block: String,
        /// Zero-based argument position.
        index: usize,
        /// Descriptions of the tokens the overloads expect at `index`.
        expected: Vec<String>,
    },
    /// The cursor is somewhere nothing can be suggested.
    Unknown,
}

/// Suggest completions for `line` at `cursor`.
///
/// A cursor directly after a token counts as being on it, so typing `Ver|`
/// completes `Ver`.
pub fn complete(registry: &Registry, line: &str, cursor: Position) -> Completion {
    let Some(call) = read_call(line).node else {
        return block_names(registry, "", None);
    };

    let found = locate(&call, cursor, Depth::Limited(1))
        .filter(|f| f.depth() == 1)
        .or_else(|| {
            let before = Position::new(cursor.line, cursor.col.checked_sub(1)?);
            locate(&call, before, Depth::Limited(1)).filter(|f| f.depth() == 1)
        });

    let children = call.children().unwrap_or_default();
    match found.and_then(|f| Some((f.node, f.index()?))) {
        Some((SyntaxNode::Symbol(head), 0)) => {
            block_names(registry, &head.text(), Some(head.range))
        }
        Some((_, 0)) => unknown(),
        Some((node, slot)) => argument(registry, children, slot - 1, Some(node.range())),
        None => between(registry, children, cursor),
    }
}

/// Cursor on a separator, a delimiter or past the end of the call.
fn between(registry: &Registry, children: &[SyntaxNode], cursor: Position) -> Completion {
    match children.first() {
        Some(head) if cursor > head.range().end => {
            let preceding = children.iter().filter(|c| c.range().end < cursor).count();
            argument(registry, children, preceding - 1, None)
        }
        _ => block_names(registry, "", None),
    }
}

fn block_names(registry: &Registry, prefix: &str, replace: Option<Range>) -> Completion {
    Completion {
        candidates: registry
            .names()
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect(),
        replace,
        context: CompletionContext::BlockName,
    }
}

fn argument(
    registry: &Registry,
    children: &[SyntaxNode],
    index: usize,
    replace: Option<Range>,
) -> Completion {
    let Some(block) = children.first().and_then(SyntaxNode::as_symbol).map(|s| s.text()) else {
        return unknown();
    };

    let mut expected: Vec<String> = Vec::new();
    for entry in registry.overloads(&block) {
        if let Some(token) = entry.tokens().get(index) {
            let shape = token.describe();
            if !expected.contains(&shape) {
                expected.push(shape);
            }
        }
    }

    Completion {
        candidates: Vec::new(),
        replace,
        context: CompletionContext::Argument {
            block,
            index,
            expected,
        },
    }
}

fn unknown() -> Completion {
    Completion {
        candidates: Vec::new(),
        replace: None,
        context: CompletionContext::Unknown,
    }
}
