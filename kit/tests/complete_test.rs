//! Autocomplete requests as an editor would send them.

use rvt::{
    BlockResult, CompletionContext, Handler, ParamType, Position, Range, Registry, Signature,
    complete,
};
use test_case::test_case;

fn registry() -> Registry {
    let mut registry = Registry::new();
    let ok = || Handler::building(|_| Ok(BlockResult::passed()));
    for name in ["VerifyAccept", "VerifyReturn", "VerifyTimeout", "Test"] {
        registry.register(name, Signature::new(), ok()).unwrap();
    }
    let send = Signature::new()
        .positional("port", ParamType::Integer)
        .variadic("payload", Some(ParamType::Text));
    registry.register("Send", send, ok()).unwrap();
    registry
}

#[test_case("Veri", 4, &["VerifyAccept", "VerifyReturn", "VerifyTimeout"] ; "prefix at end")]
#[test_case("VerifyR", 3, &["VerifyReturn"] ; "cursor inside token")]
#[test_case("(Te", 3, &["Test"] ; "open paren")]
#[test_case("  Se 1 2", 4, &["Send"] ; "leading spaces")]
#[test_case("Nothing", 7, &[] ; "no match")]
#[test_case(
    "", 0, &["Send", "Test", "VerifyAccept", "VerifyReturn", "VerifyTimeout"] ;
    "empty line"
)]
fn test_block_names(line: &str, col: usize, expected: &[&str]) {
    let completion = complete(&registry(), line, Position::new(0, col));
    assert_eq!(completion.context, CompletionContext::BlockName);
    assert_eq!(completion.candidates, expected);
}

#[test]
fn test_replace_range_covers_whole_token() {
    let completion = complete(&registry(), "  VerifyTi x", Position::new(0, 5));
    assert_eq!(
        completion.replace,
        Some(Range::new(Position::new(0, 2), Position::new(0, 9)))
    );
}

#[test_case("Send 80", 7, 0, &["number"] ; "on first argument")]
#[test_case("Send 80 ", 8, 1, &["text..."] ; "after first argument")]
#[test_case("(Send 80 a", 10, 1, &["text..."] ; "unterminated call")]
#[test_case("Test ", 5, 0, &[] ; "block without parameters")]
fn test_argument_hints(line: &str, col: usize, index: usize, expected: &[&str]) {
    let completion = complete(&registry(), line, Position::new(0, col));
    assert!(completion.candidates.is_empty());
    let CompletionContext::Argument {
        block,
        index: actual,
        expected: shapes,
    } = completion.context
    else {
        panic!("expected argument context, got {:?}", completion.context);
    };
    assert_eq!(block, line.trim_start_matches('(').split(' ').next().unwrap());
    assert_eq!(actual, index);
    assert_eq!(shapes, expected);
}

#[cfg(feature = "serde")]
#[test]
fn test_completion_serializes() {
    let completion = complete(&registry(), "VerifyT", Position::new(0, 7));
    let json = serde_json::to_string_pretty(&completion).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "candidates": [
        "VerifyTimeout"
      ],
      "replace": {
        "start": {
          "line": 0,
          "col": 0
        },
        "end": {
          "line": 0,
          "col": 6
        }
      },
      "context": {
        "kind": "block_name"
      }
    }
    "#);
}
