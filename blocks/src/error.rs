use rvt_core::{Range, ReadError};
use thiserror::Error;

/// A block definition that cannot be registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("block `{block}` cannot have non-defaulted keyword-only parameter `{param}`")]
    KeywordOnlyWithoutDefault { block: String, param: String },

    #[error("block `{block}` has no token type for parameter `{param}`")]
    UnresolvedParam { block: String, param: String },

    #[error("setup block `{block}` must take a list of steps as its first parameter")]
    SetupRequiresList { block: String },
}

/// No registered block accepts a call.
///
/// This is a soft failure: the caller reports "could not resolve" and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("could not resolve `{name}`: no such block")]
    UnknownBlock { name: String },

    #[error("could not resolve `{name}` with {args} argument(s)")]
    NoMatch { name: String, args: usize },
}

impl BindError {
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownBlock { name } | Self::NoMatch { name, .. } => name,
        }
    }
}

/// A bound value that does not fit the Rust parameter it is handed to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct ConvertError {
    pub expected: &'static str,
    pub found: String,
}

impl ConvertError {
    pub fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }
}

/// Failure raised while running a bound block.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("missing argument `{param}`")]
    MissingArgument { param: String },

    #[error("argument `{param}`: {source}")]
    Conversion {
        param: String,
        #[source]
        source: ConvertError,
    },

    #[error("{0}")]
    Failed(String),
}

impl BlockError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A line that cannot be turned into a [`Step`](crate::Step).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("line is empty")]
    Empty,

    #[error("invalid line: {}", join_errors(.errors))]
    Syntax { errors: Vec<ReadError> },

    #[error("expected a block name, found {found} {range}")]
    ExpectedName { found: &'static str, range: Range },

    #[error("unsupported argument: {found} {range}")]
    UnsupportedArgument { found: &'static str, range: Range },

    #[error("argument `{arg}` needs quotes but contains a backslash")]
    Unprintable { arg: String },
}

fn join_errors(errors: &[ReadError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvt_core::{Position, ReadErrorKind};

    #[test]
    fn test_bind_error_message() {
        let err = BindError::NoMatch {
            name: "Open".into(),
            args: 2,
        };
        assert_eq!(err.to_string(), "could not resolve `Open` with 2 argument(s)");
        assert_eq!(err.name(), "Open");
    }

    #[test]
    fn test_line_error_lists_every_diagnostic() {
        let at = Range::point(Position::new(0, 3));
        let err = LineError::Syntax {
            errors: vec![
                ReadError::new(ReadErrorKind::UnterminatedString, at),
                ReadError::new(ReadErrorKind::UnterminatedList, at),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid line: unterminated string @0:3-0:3; unterminated list @0:3-0:3"
        );
    }
}
