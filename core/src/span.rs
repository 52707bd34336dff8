//! Source positions and ranges.
//!
//! Unlike byte-offset spans, rvt tracks `(line, col)` pairs because the
//! reader's consumers are editors: the autocomplete front-end receives a
//! cursor as a line and a column and must map it back onto the tree.

use core::cmp::Ordering;
use core::fmt;

/// A zero-based line/column pair.
///
/// Ordering is lexicographic: line first, then column.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl From<(usize, usize)> for Position {
    #[inline]
    fn from((line, col): (usize, usize)) -> Self {
        Self { line, col }
    }
}

/// A source range.
///
/// Both ends are inclusive: `end` is the position of the last character that
/// belongs to the node, not one past it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range covering a single position.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Three-way comparison of a position against this range.
    ///
    /// Returns `Less` when `pos` lies before `start`, `Greater` when it lies
    /// after `end` and `Equal` when the range contains it.
    pub fn compare(&self, pos: Position) -> Ordering {
        if pos < self.start {
            Ordering::Less
        } else if pos > self.end {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.compare(pos) == Ordering::Equal
    }

    /// Join two ranges into one covering both.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// True when start and end sit on the same line.
    #[inline]
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}-{}", self.start, self.end)
    }
}
