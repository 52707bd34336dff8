//! Argument tokens.
//!
//! A token looks at the front of the remaining argument list and either
//! consumes a prefix, producing one bound value, or rejects. The binder runs
//! one token per declared parameter, feeding each the suffix the previous one
//! left behind.

use core::fmt;

use crate::value::Value;

/// One parameter's view of the argument list.
///
/// Implementations must consume a non-empty prefix when they accept. Custom
/// tokens are registered through [`ParamType::custom`](crate::ParamType::custom).
pub trait Token: fmt::Debug + Send + Sync {
    /// Consume a prefix of `args`, returning the bound value and the rest.
    fn parse<'a>(&self, args: &'a [Value]) -> Option<(Value, &'a [Value])>;

    /// Short description of what the token accepts, used for completion hints.
    fn describe(&self) -> String;
}

/// Accepts the first argument as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyToken;

impl Token for AnyToken {
    fn parse<'a>(&self, args: &'a [Value]) -> Option<(Value, &'a [Value])> {
        let (first, rest) = args.split_first()?;
        Some((first.clone(), rest))
    }

    fn describe(&self) -> String {
        "any".to_string()
    }
}

/// Accepts an argument that is, or parses as, a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberToken;

impl Token for NumberToken {
    fn parse<'a>(&self, args: &'a [Value]) -> Option<(Value, &'a [Value])> {
        let (first, rest) = args.split_first()?;
        let n = match first {
            Value::Number(n) => *n,
            Value::Text(s) => s.parse::<f64>().ok()?,
            Value::List(_) => return None,
        };
        Some((Value::Number(n), rest))
    }

    fn describe(&self) -> String {
        "number".to_string()
    }
}

/// Accepts a textual argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringToken;

impl Token for StringToken {
    fn parse<'a>(&self, args: &'a [Value]) -> Option<(Value, &'a [Value])> {
        match args.split_first()? {
            (Value::Text(s), rest) => Some((Value::Text(s.clone()), rest)),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        "text".to_string()
    }
}

/// Greedily gathers one or more elements.
///
/// The list takes every argument its element accepts and never gives any
/// back, so a list followed by a parameter its element would also accept can
/// never bind.
#[derive(Debug)]
pub struct ListToken {
    element: Box<dyn Token>,
}

impl ListToken {
    pub fn new(element: Box<dyn Token>) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &dyn Token {
        self.element.as_ref()
    }
}

impl Default for ListToken {
    fn default() -> Self {
        Self::new(Box::new(AnyToken))
    }
}

impl Token for ListToken {
    fn parse<'a>(&self, args: &'a [Value]) -> Option<(Value, &'a [Value])> {
        let mut items = Vec::new();
        let mut rest = args;
        while !rest.is_empty() {
            let Some((value, remaining)) = self.element.parse(rest) else {
                break;
            };
            // an element that consumed nothing would loop forever
            if remaining.len() >= rest.len() {
                break;
            }
            items.push(value);
            rest = remaining;
        }
        if items.is_empty() {
            None
        } else {
            Some((Value::List(items), rest))
        }
    }

    fn describe(&self) -> String {
        format!("{}...", self.element.describe())
    }
}
