//! Reader diagnostics.
//!
//! The reader never fails: malformed input produces a best-effort node plus a
//! list of [`ReadError`]s. Callers decide which of them are fatal.

use core::fmt;

use thiserror::Error;

use crate::span::Range;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadErrorKind {
    #[error("illegal character for symbol '{0}'")]
    IllegalCharacter(char),

    #[error("unexpected character '{0}'")]
    UnexpectedDelimiter(char),

    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    #[error("unterminated string")]
    UnterminatedString,

    #[error("unterminated list")]
    UnterminatedList,

    #[error("unterminated vector")]
    UnterminatedVector,

    #[error("{0} are not supported")]
    NotImplemented(Unsupported),

    #[error("nesting depth {depth} exceeds limit {limit}")]
    RecursionLimitExceeded { depth: usize, limit: usize },

    #[error("unexpected input after form")]
    TrailingInput,
}

/// Reader forms that are reserved but not implemented.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    Maps,
    Sets,
    Comments,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Maps => "maps",
            Self::Sets => "sets",
            Self::Comments => "comments",
        })
    }
}

/// A diagnostic with the source range it applies to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} {range}")]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub range: Range,
}

impl ReadError {
    #[inline]
    pub fn new(kind: ReadErrorKind, range: Range) -> Self {
        Self { kind, range }
    }

    /// Human readable message without the location suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// True for errors caused by input that simply stopped too early.
    ///
    /// An editor may treat these as "keep typing" rather than as mistakes.
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self.kind,
            ReadErrorKind::UnterminatedString
                | ReadErrorKind::UnterminatedList
                | ReadErrorKind::UnterminatedVector
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_messages() {
        let range = Range::new(Position::new(0, 1), Position::new(0, 2));
        let err = ReadError::new(ReadErrorKind::InvalidEscape('q'), range);
        assert_eq!(err.message(), "invalid escape sequence '\\q'");
        assert_eq!(err.to_string(), "invalid escape sequence '\\q' @0:1-0:2");
        assert!(!err.is_unterminated());

        let err = ReadError::new(ReadErrorKind::NotImplemented(Unsupported::Maps), range);
        assert_eq!(err.message(), "maps are not supported");
    }
}
