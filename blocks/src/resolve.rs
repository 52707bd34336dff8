//! Parameter type to token resolution.

use crate::signature::{Param, ParamKind, ParamType};
use crate::token::{AnyToken, ListToken, NumberToken, StringToken, Token};

/// Token for a parameter type, or `None` when the type has no token.
pub fn resolve_type(ty: &ParamType) -> Option<Box<dyn Token>> {
    let token: Box<dyn Token> = match ty {
        ParamType::Any => Box::new(AnyToken),
        ParamType::Integer | ParamType::Float => Box::new(NumberToken),
        ParamType::Text => Box::new(StringToken),
        ParamType::List => Box::new(ListToken::default()),
        ParamType::ListOf(element) => Box::new(ListToken::new(resolve_type(element)?)),
        ParamType::Custom(custom) => custom.instantiate(),
        ParamType::Opaque(_) => return None,
    };
    Some(token)
}

/// Token for one declared parameter.
///
/// A variadic parameter always collects a list: untyped it takes anything,
/// typed `T` it takes a list of `T` unless `T` is already a list type.
pub fn resolve_param(param: &Param) -> Option<Box<dyn Token>> {
    match (&param.kind, &param.ty) {
        (ParamKind::Variadic, None) => Some(Box::new(ListToken::default())),
        (ParamKind::Variadic, Some(ty)) if !ty.is_list() => {
            Some(Box::new(ListToken::new(resolve_type(ty)?)))
        }
        (_, Some(ty)) => resolve_type(ty),
        (_, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;
    use crate::value::Value;

    fn args(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_numeric_tags_share_number_token() {
        for ty in [ParamType::Integer, ParamType::Float] {
            let token = resolve_type(&ty).unwrap();
            assert_eq!(token.describe(), "number");
        }
    }

    #[test]
    fn test_list_of_resolves_element() {
        let token = resolve_type(&ParamType::list_of(ParamType::Integer)).unwrap();
        assert_eq!(token.describe(), "number...");
    }

    #[test]
    fn test_nested_opaque_does_not_resolve() {
        assert!(resolve_type(&ParamType::Opaque("Socket")).is_none());
        assert!(resolve_type(&ParamType::list_of(ParamType::Opaque("Socket"))).is_none());
    }

    #[test]
    fn test_custom_token_is_instantiated() {
        let token = resolve_type(&ParamType::custom::<StringToken>()).unwrap();
        assert_eq!(token.describe(), "text");
    }

    #[test]
    fn test_variadic_wraps_element() {
        let sig = Signature::new()
            .variadic("any", None)
            .variadic("nums", Some(ParamType::Float))
            .variadic("lists", Some(ParamType::List));
        let described: Vec<_> = sig
            .params()
            .iter()
            .map(|p| resolve_param(p).unwrap().describe())
            .collect();
        assert_eq!(described, ["any...", "number...", "any..."]);
    }

    #[test]
    fn test_untyped_positional_does_not_resolve() {
        let sig = Signature::new().untyped("x");
        assert!(resolve_param(&sig.params()[0]).is_none());
    }

    #[test]
    fn test_resolved_list_token_binds() {
        let token = resolve_type(&ParamType::list_of(ParamType::Float)).unwrap();
        let input = args(&["1", "2"]);
        let (value, rest) = token.parse(&input).unwrap();
        assert_eq!(value, Value::List(vec![1.0.into(), 2.0.into()]));
        assert!(rest.is_empty());
    }
}
