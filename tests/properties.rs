//! Property tests for the scanner's stream-level guarantees.

use clx::lexer::{
    lexer::{tokenize, tokenize_recovering},
    tokens::{Token, TokenKind, RESERVED_WORDS},
};
use proptest::prelude::*;

/// Source built only from bytes that always scan cleanly. `>` is left out
/// since it is only valid as the tail of `->` or `=>`.
const CLEAN_SOURCE: &str = "[a-zA-Z_0-9 \n&{},().;*=-]{0,80}";

const LEXEMES: &[&str] = &[
    "let", "fn", "for", "foreign", "x", "_y", "Point", "42", "0", "'str'", "'a\\0b'", "->", "=>",
    "-", "=", "&", "{", "}", "(", ")", ",", ".", ";", "*", "nil", "true", "falsey",
];

fn keyword() -> impl Strategy<Value = (&'static str, TokenKind)> {
    prop::sample::select(RESERVED_WORDS.to_vec())
}

fn shape<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a [u8])> {
    tokens.iter().map(|token| (token.kind, token.value)).collect()
}

proptest! {
    #[test]
    fn stream_terminates_with_one_end(source in CLEAN_SOURCE) {
        let tokens = tokenize(&source, None).unwrap();

        prop_assert!(tokens.len() <= source.len() + 1);
        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::End));
        prop_assert_eq!(tokens.iter().filter(|token| token.kind == TokenKind::End).count(), 1);
    }

    #[test]
    fn tokens_are_sub_ranges_of_the_source(source in CLEAN_SOURCE) {
        for token in tokenize(&source, None).unwrap() {
            let start = token.offset();
            prop_assert!(start + token.len() <= source.len());
            prop_assert_eq!(&source.as_bytes()[start..start + token.len()], token.value);
            prop_assert_eq!(token.span.end.offset as usize, start + token.len());
        }
    }

    #[test]
    fn round_trip_drops_only_whitespace(source in CLEAN_SOURCE) {
        let tokens = tokenize(&source, None).unwrap();

        let joined: Vec<u8> = tokens.iter().flat_map(|token| token.value.iter().copied()).collect();
        let meaningful: Vec<u8> = source.bytes().filter(|b| *b != b' ' && *b != b'\n').collect();
        prop_assert_eq!(joined, meaningful);
    }

    #[test]
    fn keyword_closed_by_non_symbol(
        (word, kind) in keyword(),
        tail in prop::sample::select(vec!["", " ", "\n", ";", "(", "7", "->"]),
    ) {
        let source = format!("{}{}", word, tail);
        let tokens = tokenize(&source, None).unwrap();

        prop_assert_eq!(tokens[0].kind, kind);
        prop_assert_eq!(tokens[0].value, word.as_bytes());
    }

    #[test]
    fn keyword_with_symbol_suffix_is_symbol(
        (word, _kind) in keyword(),
        suffix in "[a-zA-Z_]{1,8}",
    ) {
        let source = format!("{}{}", word, suffix);
        let tokens = tokenize(&source, None).unwrap();

        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Symbol);
        prop_assert_eq!(tokens[0].value, source.as_bytes());
    }

    #[test]
    fn whitespace_between_tokens_is_irrelevant(
        pieces in prop::collection::vec(prop::sample::select(LEXEMES.to_vec()), 0..16),
        gaps in prop::collection::vec("[ \n]{1,4}", 16),
    ) {
        let compact = pieces.join(" ");
        let mut spread = String::new();
        for (piece, gap) in pieces.iter().zip(&gaps) {
            spread.push_str(gap);
            spread.push_str(piece);
        }

        let compact_tokens = tokenize(&compact, None).unwrap();
        let spread_tokens = tokenize(&spread, None).unwrap();
        prop_assert_eq!(shape(&compact_tokens), shape(&spread_tokens));
    }

    #[test]
    fn recovering_scan_never_panics(source in ".{0,64}") {
        let (tokens, errors) = tokenize_recovering(&source, None);

        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::End));
        prop_assert!(tokens.len() + errors.len() <= source.len() + 1);
        for token in &tokens {
            prop_assert!(token.offset() + token.len() <= source.len());
        }
    }

    #[test]
    fn recovering_scan_handles_arbitrary_bytes(
        source in prop::collection::vec(any::<u8>().prop_filter("non-NUL", |b| *b != 0), 0..64),
    ) {
        let (tokens, errors) = tokenize_recovering(&source, None);

        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::End));
        prop_assert_eq!(tokens.last().map(|token| token.offset()), Some(source.len()));
        prop_assert!(tokens.len() + errors.len() <= source.len() + 1);
        for token in &tokens {
            let start = token.offset();
            prop_assert_eq!(&source[start..start + token.len()], token.value);
        }
    }
}
