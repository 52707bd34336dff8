//! Pending actions read from test lines.

use core::fmt;
use core::str::FromStr;

use rvt_core::{CharStream, Printer, Range, ReadOutput, Reader, Seq, SourcePrinter, SyntaxNode};

use crate::error::{BlockError, ConvertError, LineError};
use crate::signature::{BlockParam, ParamType};
use crate::value::Value;

/// Read a line as a call form.
///
/// A line holding a single list is that list. Anything else, such as the
/// bare `Open 8080 "a b"`, is wrapped in a list spanning the forms read.
/// Reader diagnostics are passed through untouched.
pub fn read_call(line: &str) -> ReadOutput {
    let mut stream = CharStream::from(line);
    let (mut forms, errors) = Reader::new(&mut stream).read_all();

    let node = match forms.len() {
        0 => None,
        1 if matches!(forms[0], SyntaxNode::List(_) | SyntaxNode::IncompleteList(_)) => forms.pop(),
        n => {
            let range = Range::new(forms[0].range().start, forms[n - 1].range().end);
            Some(SyntaxNode::List(Seq {
                children: forms,
                range,
            }))
        }
    };
    ReadOutput { node, errors }
}

/// One action of a test case: a block name and its raw arguments.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    pub name: String,
    pub args: Vec<String>,
}

impl Step {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        args: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `name arg...` or `(name arg...)`.
    ///
    /// Arguments may be symbols, keywords or strings; nested lists are
    /// rejected since blocks receive flat text arguments.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let (node, errors) = read_call(line).into_parts();
        if !errors.is_empty() {
            return Err(LineError::Syntax { errors });
        }
        let node = node.ok_or(LineError::Empty)?;
        let children = node.children().unwrap_or_default();
        let (head, rest) = children.split_first().ok_or(LineError::Empty)?;

        let name = head.as_symbol().ok_or(LineError::ExpectedName {
            found: head.kind_name(),
            range: head.range(),
        })?;
        let args = rest
            .iter()
            .map(|arg| {
                arg.atom_text().ok_or(LineError::UnsupportedArgument {
                    found: arg.kind_name(),
                    range: arg.range(),
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            name: name.text(),
            args,
        })
    }

    /// Render the step as a line that parses back to it.
    ///
    /// Strings only know the `\n`, `\r` and quote escapes, so an argument
    /// that must be quoted cannot carry a backslash.
    pub fn to_line(&self) -> Result<String, LineError> {
        if let Some(arg) = self.args.iter().find(|a| needs_quotes(a) && a.contains('\\')) {
            return Err(LineError::Unprintable { arg: arg.clone() });
        }
        Ok(self.render())
    }

    /// Arguments as binder input.
    pub fn values(&self) -> Vec<Value> {
        self.args.iter().map(|a| Value::from(a.as_str())).collect()
    }

    fn render(&self) -> String {
        let mut p = SourcePrinter::default();
        p.word(&self.name);
        for arg in &self.args {
            p.space();
            if needs_quotes(arg) {
                p.quoted(arg, '"');
            } else {
                p.word(arg);
            }
        }
        p.into_string()
    }
}

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || "()[]{};#,\"'".contains(c))
}

/// Best-effort rendering; see [`Step::to_line`] for the exact form.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Step {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Steps are handed to setup blocks directly and never bound from arguments.
impl BlockParam for Step {
    fn param_type() -> ParamType {
        ParamType::Opaque("Step")
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        Err(ConvertError::new("step", value.type_name()))
    }
}

/// Step lists derived by a setup block, one per generated test case.
pub type Expansion = Vec<Vec<Step>>;

/// Return types a setup block may use.
pub trait IntoExpansion {
    fn into_expansion(self) -> Result<Expansion, BlockError>;
}

impl IntoExpansion for Expansion {
    fn into_expansion(self) -> Result<Expansion, BlockError> {
        Ok(self)
    }
}

impl<T, E> IntoExpansion for Result<T, E>
where
    T: IntoExpansion,
    E: Into<BlockError>,
{
    fn into_expansion(self) -> Result<Expansion, BlockError> {
        self.map_err(Into::into)?.into_expansion()
    }
}
