use proptest::prelude::*;
use stride_syntax::{ModeStack, TokenCategory, classify, is_keyword, tokenize};

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}".prop_filter("keywords classify as Keyword", |s| !is_keyword(s))
}

fn stride_like() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("let "),
            Just("fn "),
            Just("name"),
            Just("call("),
            Just(")"),
            Just("/*"),
            Just("*/"),
            Just("//"),
            Just("\""),
            Just("'"),
            Just("\\"),
            Just("\\x4"),
            Just("0x1F"),
            Just("3.14"),
            Just("42L"),
            Just(".5"),
            Just("==="),
            Just(" "),
            Just("\n"),
            Just("@"),
            Just("é"),
        ],
        0..64,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_reassemble_arbitrary_text(source in "\\PC*") {
        let rebuilt: String = tokenize(&source).iter().map(|t| t.text).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn tokens_reassemble_stride_like_text(source in stride_like()) {
        let tokens = tokenize(&source);
        prop_assert!(tokens.iter().all(|t| !t.text.is_empty()));

        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn spans_are_contiguous(source in stride_like()) {
        let mut expected_start = 0;
        for token in tokenize(&source) {
            prop_assert_eq!(token.span.start, expected_start);
            prop_assert_eq!(&source[token.span.start..token.span.end], token.text);
            expected_start = token.span.end;
        }
        prop_assert_eq!(expected_start, source.len());
    }

    #[test]
    fn identifier_before_paren_is_function_name(name in identifier(), gap in "[ \t]{0,2}") {
        let source = format!("{name}{gap}(x)");
        let mut modes = ModeStack::new();
        let lexeme = classify(&source, &mut modes).unwrap();

        prop_assert_eq!(lexeme.text, name.as_str());
        prop_assert_eq!(lexeme.category, TokenCategory::FunctionName);
    }

    #[test]
    fn identifier_without_paren_is_identifier(name in identifier(), follower in "[ ;,.+\\]]") {
        let source = format!("{name}{follower}");
        let mut modes = ModeStack::new();
        let lexeme = classify(&source, &mut modes).unwrap();

        prop_assert_eq!(lexeme.text, name.as_str());
        prop_assert_eq!(lexeme.category, TokenCategory::Identifier);
    }

    #[test]
    fn operator_runs_are_one_token(run in "[=><!~?:&|+\\-*^%]{1,6}") {
        let source = format!("a {run} b");
        let tokens = tokenize(&source);

        prop_assert_eq!(tokens[2].text, run.as_str());
        prop_assert_eq!(tokens[2].category, TokenCategory::Operator);
    }
}
