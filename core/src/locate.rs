//! Cursor-to-node lookup.
//!
//! Editors ask "what is under the cursor?" with a line and a column. The
//! locator answers with the most specific node whose range contains that
//! position, optionally capped at a nesting depth, together with the chain
//! of enclosing nodes so callers can see which child slot the cursor is in.

use crate::node::SyntaxNode;
use crate::span::Position;

/// How far below the starting node the locator may descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    #[default]
    Unlimited,
    Limited(usize),
}

impl Depth {
    fn descend(self) -> Option<Self> {
        match self {
            Self::Unlimited => Some(Self::Unlimited),
            Self::Limited(0) => None,
            Self::Limited(n) => Some(Self::Limited(n - 1)),
        }
    }
}

impl From<usize> for Depth {
    #[inline]
    fn from(levels: usize) -> Self {
        Self::Limited(levels)
    }
}

/// A node found by [`locate`], with the path that led to it.
///
/// Parents are borrowed back-references into the tree; the tree itself
/// keeps sole ownership of its nodes.
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub node: &'a SyntaxNode,
    /// Enclosing nodes from the root down, each with the index of the child
    /// that was followed.
    path: Vec<(&'a SyntaxNode, usize)>,
}

impl<'a> Located<'a> {
    pub fn parent(&self) -> Option<&'a SyntaxNode> {
        self.path.last().map(|(parent, _)| *parent)
    }

    /// Index of the node within its parent's children.
    pub fn index(&self) -> Option<usize> {
        self.path.last().map(|(_, idx)| *idx)
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &'a SyntaxNode> + '_ {
        self.path.iter().rev().map(|(node, _)| *node)
    }
}

/// Find the most specific node of `tree` containing `pos`.
///
/// Returns `None` when `pos` lies outside `tree`, or when it lies inside a
/// list but between children (the separators belong to no token).
pub fn locate(tree: &SyntaxNode, pos: Position, depth: impl Into<Depth>) -> Option<Located<'_>> {
    let mut path = Vec::new();
    let node = locate_in(tree, pos, depth.into(), &mut path)?;
    Some(Located { node, path })
}

/// Like [`locate`] but returns only the node.
pub fn find_token(
    tree: &SyntaxNode,
    line: usize,
    col: usize,
    depth: impl Into<Depth>,
) -> Option<&SyntaxNode> {
    locate(tree, Position::new(line, col), depth).map(|found| found.node)
}

fn locate_in<'a>(
    node: &'a SyntaxNode,
    pos: Position,
    depth: Depth,
    path: &mut Vec<(&'a SyntaxNode, usize)>,
) -> Option<&'a SyntaxNode> {
    if !node.range().contains(pos) {
        return None;
    }
    let Some(next) = depth.descend() else {
        return Some(node);
    };
    let Some(children) = node.children() else {
        return Some(node);
    };

    for (idx, child) in children.iter().enumerate() {
        path.push((node, idx));
        if let Some(found) = locate_in(child, pos, next, path) {
            return Some(found);
        }
        path.pop();
    }
    None
}
