//! Declared block parameters.
//!
//! Blocks describe their parameters with a closed vocabulary of
//! [`ParamType`] tags. Resolution (see [`resolve`](crate::resolve)) turns the
//! tags into tokens once, at registration.

use core::any::type_name;

use crate::error::{BlockError, ConvertError};
use crate::token::Token;
use crate::value::Value;

/// What a parameter accepts.
#[derive(Debug, Clone)]
pub enum ParamType {
    /// Any single argument.
    Any,
    Integer,
    Float,
    Text,
    /// A list of anything.
    List,
    ListOf(Box<ParamType>),
    /// A user-supplied token.
    Custom(CustomToken),
    /// A type the binder cannot produce from arguments.
    Opaque(&'static str),
}

impl ParamType {
    /// Use `T` as the token for this parameter.
    pub fn custom<T: Token + Default + 'static>() -> Self {
        Self::Custom(CustomToken {
            name: type_name::<T>(),
            make: make_token::<T>,
        })
    }

    pub fn list_of(element: ParamType) -> Self {
        Self::ListOf(Box::new(element))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List | Self::ListOf(_))
    }
}

fn make_token<T: Token + Default + 'static>() -> Box<dyn Token> {
    Box::new(T::default())
}

/// Constructor for a custom token type.
#[derive(Debug, Clone, Copy)]
pub struct CustomToken {
    pub name: &'static str,
    make: fn() -> Box<dyn Token>,
}

impl CustomToken {
    pub fn instantiate(&self) -> Box<dyn Token> {
        (self.make)()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Positional,
    /// Collects the remaining arguments.
    Variadic,
    KeywordOnly { has_default: bool },
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    /// `None` when the parameter was declared without a type.
    pub ty: Option<ParamType>,
}

/// Ordered parameter list of a block.
///
/// ```
/// use rvt_blocks::{ParamType, Signature};
///
/// let sig = Signature::new()
///     .positional("port", ParamType::Integer)
///     .variadic("hosts", Some(ParamType::Text));
/// assert_eq!(sig.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn positional(self, name: impl Into<String>, ty: ParamType) -> Self {
        self.param(Param {
            name: name.into(),
            kind: ParamKind::Positional,
            ty: Some(ty),
        })
    }

    /// A positional parameter with no declared type.
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.param(Param {
            name: name.into(),
            kind: ParamKind::Positional,
            ty: None,
        })
    }

    pub fn variadic(self, name: impl Into<String>, ty: Option<ParamType>) -> Self {
        self.param(Param {
            name: name.into(),
            kind: ParamKind::Variadic,
            ty,
        })
    }

    pub fn keyword_only(self, name: impl Into<String>, ty: ParamType, has_default: bool) -> Self {
        self.param(Param {
            name: name.into(),
            kind: ParamKind::KeywordOnly { has_default },
            ty: Some(ty),
        })
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameters filled from positional arguments, in order.
    pub fn positional_params(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|p| matches!(p.kind, ParamKind::Positional | ParamKind::Variadic))
    }

    /// Keyword-only parameters that have no default.
    pub fn required_keyword_only(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|p| p.kind == ParamKind::KeywordOnly { has_default: false })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A Rust type usable as a block parameter.
///
/// `param_type` picks the token at registration; `from_value` converts the
/// value that token produced back into `Self` at call time.
pub trait BlockParam: Sized {
    fn param_type() -> ParamType;

    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

impl BlockParam for Value {
    fn param_type() -> ParamType {
        ParamType::Any
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        Ok(value)
    }
}

impl BlockParam for String {
    fn param_type() -> ParamType {
        ParamType::Text
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ConvertError::new("text", other.type_name())),
        }
    }
}

fn number(value: &Value) -> Result<f64, ConvertError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => s.parse().map_err(|_| ConvertError::new("number", s.clone())),
        Value::List(_) => Err(ConvertError::new("number", "list")),
    }
}

impl BlockParam for f64 {
    fn param_type() -> ParamType {
        ParamType::Float
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        number(&value)
    }
}

impl BlockParam for f32 {
    fn param_type() -> ParamType {
        ParamType::Float
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        number(&value).map(|n| n as f32)
    }
}

macro_rules! impl_integer_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BlockParam for $ty {
                fn param_type() -> ParamType {
                    ParamType::Integer
                }

                fn from_value(value: Value) -> Result<Self, ConvertError> {
                    let n = number(&value)?;
                    if n.fract() != 0.0 || n < <$ty>::MIN as f64 || n >= <$ty>::MAX as f64 + 1.0 {
                        return Err(ConvertError::new(stringify!($ty), n.to_string()));
                    }
                    Ok(n as $ty)
                }
            }
        )*
    };
}

impl_integer_param!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: BlockParam> BlockParam for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::list_of(T::param_type())
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(ConvertError::new("list", other.type_name())),
        }
    }
}

/// Pull the next bound value and convert it for parameter `param`.
///
/// Generated block wrappers call this once per parameter.
pub fn next_arg<T: BlockParam>(
    args: &mut impl Iterator<Item = Value>,
    param: &str,
) -> Result<T, BlockError> {
    let value = args.next().ok_or_else(|| BlockError::MissingArgument {
        param: param.to_string(),
    })?;
    T::from_value(value).map_err(|source| BlockError::Conversion {
        param: param.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_positional_params_skip_keyword_only() {
        let sig = Signature::new()
            .positional("a", ParamType::Any)
            .keyword_only("k", ParamType::Text, true)
            .variadic("rest", None);
        let names: Vec<_> = sig.positional_params().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "rest"]);
        assert_eq!(sig.required_keyword_only().count(), 0);
    }

    #[test]
    fn test_rust_types_map_to_tags() {
        assert!(matches!(i32::param_type(), ParamType::Integer));
        assert!(matches!(f64::param_type(), ParamType::Float));
        assert!(matches!(String::param_type(), ParamType::Text));
        assert!(matches!(Value::param_type(), ParamType::Any));
        assert!(matches!(
            Vec::<u8>::param_type(),
            ParamType::ListOf(inner) if matches!(*inner, ParamType::Integer)
        ));
    }

    #[test_case(Value::Number(3.0), Ok(3) ; "whole number")]
    #[test_case(Value::Number(3.5), Err(()) ; "fraction")]
    #[test_case(Value::Number(300.0), Err(()) ; "out of range")]
    #[test_case(Value::from("7"), Ok(7) ; "numeric text")]
    #[test_case(Value::from("x"), Err(()) ; "text")]
    fn test_integer_conversion(value: Value, expected: Result<u8, ()>) {
        assert_eq!(u8::from_value(value).map_err(|_| ()), expected);
    }

    #[test_case("255", true ; "u8 max")]
    #[test_case("256", false ; "past u8 max")]
    fn test_u8_upper_bound(text: &str, ok: bool) {
        assert_eq!(u8::from_value(Value::from(text)).is_ok(), ok);
    }

    #[test_case("-9223372036854775808", true ; "i64 min")]
    #[test_case("9223372036854775807", false ; "i64 max rounds past range")]
    #[test_case("9223372036854775808", false ; "past i64 max")]
    fn test_i64_bounds(text: &str, ok: bool) {
        assert_eq!(i64::from_value(Value::from(text)).is_ok(), ok);
    }

    #[test_case("18446744073709551616", false ; "past u64 max")]
    #[test_case("18446744073709549568", true ; "largest exact u64")]
    fn test_u64_upper_bound(text: &str, ok: bool) {
        assert_eq!(u64::from_value(Value::from(text)).is_ok(), ok);
    }

    #[test]
    fn test_out_of_range_reports_type() {
        let err = i64::from_value(Value::from("9223372036854775808")).unwrap_err();
        assert_eq!(err.to_string(), "expected i64, found 9223372036854775808");
    }

    #[test]
    fn test_vec_conversion() {
        let value = Value::List(vec![1.0.into(), 2.0.into()]);
        assert_eq!(Vec::<i64>::from_value(value).unwrap(), vec![1, 2]);
        assert!(Vec::<i64>::from_value(Value::from("1")).is_err());
    }

    #[test]
    fn test_next_arg_reports_param() {
        let mut args = vec![Value::from("x")].into_iter();
        let err = next_arg::<f64>(&mut args, "port").unwrap_err();
        assert_eq!(err.to_string(), "argument `port`: expected number, found x");
        let err = next_arg::<f64>(&mut args, "port").unwrap_err();
        assert_eq!(
            err,
            BlockError::MissingArgument {
                param: "port".into()
            }
        );
    }
}
