//! Property-based tests for attribute parsing, classification and index accumulation

use proptest::prelude::*;
use std::collections::BTreeMap;
use template_index::indexing::{
    attribute, AttributeType, ContextCategory, IndexedDocument, Indexer, Language,
    NeverInComment, Token, TokenKind, TEMPLATE_TABLES,
};
use template_index::lexer::lex_template;

/// Kinds that contribute to the indices
fn contributing_kind() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        Just(TokenKind::Text),
        Just(TokenKind::TagName),
        Just(TokenKind::AttributeName),
        Just(TokenKind::AttributeValue),
        Just(TokenKind::CommentBody),
        Just(TokenKind::ExprIdentifier),
        Just(TokenKind::ExprKeyword),
        Just(TokenKind::ExprString),
        Just(TokenKind::ExprNumber),
        Just(TokenKind::Embedded(Language::Css)),
    ]
}

fn skipped_kind() -> impl Strategy<Value = TokenKind> {
    prop::sample::select(TEMPLATE_TABLES.skip.kinds().to_vec())
}

/// Token text mixing words, sigils, escapes and markers
fn token_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z_$][a-zA-Z0-9_]{0,6}",
            "[ .,:;\\-+]{1,2}",
            Just("\\\"".to_string()),
            Just("TODO".to_string()),
            Just("fixme".to_string()),
            Just("[(".to_string()),
            Just(")]".to_string()),
            Just("*".to_string()),
            Just("#".to_string()),
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn layout(specs: Vec<(TokenKind, String)>) -> Vec<Token> {
    let mut offset = 0;
    specs
        .into_iter()
        .map(|(kind, text)| {
            let token = Token::at(kind, text, offset);
            offset = token.range.end + 1;
            token
        })
        .collect()
}

fn token_stream() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec((contributing_kind(), token_text()), 0..12).prop_map(layout)
}

fn index(tokens: &[Token]) -> IndexedDocument {
    Indexer::default()
        .index(tokens, &NeverInComment)
        .expect("well-formed tokens index")
}

/// Raw attribute names, biased toward decorated shapes
fn attribute_name() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just(""),
        Just("["),
        Just("("),
        Just("[("),
        Just("*"),
        Just("#"),
        Just("ref-"),
        Just("let-"),
        Just("bind-"),
        Just("bindon-"),
        Just("on-"),
        Just("data-"),
        Just("DATA-"),
    ];
    let suffix = prop_oneof![Just(""), Just("]"), Just(")"), Just(")]")];
    (prefix, "\\PC{0,10}", suffix).prop_map(|(p, body, s)| format!("{p}{body}{s}"))
}

proptest! {
    #[test]
    fn test_indexing_is_idempotent(tokens in token_stream()) {
        prop_assert_eq!(index(&tokens), index(&tokens));
    }

    #[test]
    fn test_contexts_are_the_union_of_occurrences(tokens in token_stream()) {
        let whole = index(&tokens);

        let mut expected: BTreeMap<String, ContextCategory> = BTreeMap::new();
        let mut expected_todos: BTreeMap<String, u32> = BTreeMap::new();
        for token in &tokens {
            let single = index(std::slice::from_ref(token));
            for (word, context) in single.occurrences.iter() {
                *expected.entry(word.to_string()).or_insert(ContextCategory::empty()) |= context;
            }
            for (id, count) in single.todos.iter() {
                *expected_todos.entry(id.to_string()).or_insert(0) += count;
            }
        }

        let actual: BTreeMap<String, ContextCategory> = whole
            .occurrences
            .iter()
            .map(|(word, context)| (word.to_string(), context))
            .collect();
        let actual_todos: BTreeMap<String, u32> = whole
            .todos
            .iter()
            .map(|(id, count)| (id.to_string(), count))
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(actual_todos, expected_todos);
    }

    #[test]
    fn test_skipped_kinds_contribute_nothing(
        specs in prop::collection::vec((skipped_kind(), token_text()), 1..8)
    ) {
        let doc = index(&layout(specs));
        prop_assert!(doc.occurrences.is_empty());
        prop_assert!(doc.todos.is_empty());
    }

    #[test]
    fn test_attribute_parsing_is_total(raw in attribute_name()) {
        let info = attribute::parse(&raw);
        prop_assert!(AttributeType::ALL.contains(&info.attribute_type));
        prop_assert_eq!(&raw[info.name_range()], info.semantic_name.as_str());
        if info.is_regular() {
            prop_assert_eq!(&info.semantic_name, &raw);
            prop_assert_eq!(info.name_range(), 0..raw.len());
        }
    }

    #[test]
    fn test_sigils_round_trip(raw in attribute_name()) {
        let info = attribute::parse(&raw);
        if !info.is_regular() {
            let rewrapped = info.attribute_type.wrap(&info.semantic_name);
            let reparsed = attribute::parse(&rewrapped);
            prop_assert_eq!(reparsed.attribute_type, info.attribute_type);
            prop_assert_eq!(reparsed.semantic_name, info.semantic_name);
        }
    }

    #[test]
    fn test_lexer_output_always_indexes(source in "\\PC{0,80}") {
        let lexed = lex_template(&source);
        let mut last_end = 0;
        for token in &lexed.tokens {
            prop_assert!(token.validate().is_ok());
            prop_assert!(token.range.start >= last_end);
            last_end = token.range.end;
        }
        prop_assert!(Indexer::default().index(&lexed.tokens, &lexed).is_ok());
    }

    #[test]
    fn test_lexer_handles_template_fragments(
        parts in prop::collection::vec(
            prop_oneof![
                Just("<div"), Just(">"), Just("</div>"), Just(" [value]=\""), Just("\""),
                Just("{{ "), Just(" }}"), Just("<!-- "), Just(" -->"), Just("<script>"),
                Just("</script>"), Just("/* "), Just(" */"), Just("// "), Just("\n"),
                Just("'"), Just("&amp;"), Just("todo"), Just("name"), Just(" "),
            ],
            0..24,
        )
    ) {
        let source = parts.concat();
        let lexed = lex_template(&source);
        prop_assert!(lexed.tokens.iter().all(|t| source[t.range.clone()] == t.text));
        prop_assert!(Indexer::default().index(&lexed.tokens, &lexed).is_ok());
    }
}
