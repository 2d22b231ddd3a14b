use lazy_static::lazy_static;
use std::{borrow::Cow, fmt::Display};

use crate::Span;

/// Reserved words and the kind each one scans to.
pub const RESERVED_WORDS: &[(&str, TokenKind)] = &[
    ("break", TokenKind::Break),
    ("else", TokenKind::Else),
    ("enum", TokenKind::Enum),
    ("false", TokenKind::BooleanLiteralFalse),
    ("fn", TokenKind::Fn),
    ("for", TokenKind::For),
    ("if", TokenKind::If),
    ("let", TokenKind::Let),
    ("loop", TokenKind::Loop),
    ("match", TokenKind::Match),
    ("nil", TokenKind::NilLiteral),
    ("struct", TokenKind::Struct),
    ("true", TokenKind::BooleanLiteralTrue),
];

lazy_static! {
    pub static ref RESERVED_TRIE: KeywordTrie = KeywordTrie::from_words(RESERVED_WORDS);
}

/// Returns true for the bytes identifiers are made of: ASCII letters and `_`.
pub fn is_symbol_char(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic()
}

/// Index of a node inside a [`KeywordTrie`].
pub type NodeId = usize;

#[derive(Debug, Default)]
struct TrieNode {
    edges: Vec<(u8, NodeId)>,
    kind: Option<TokenKind>,
}

/// Prefix tree over the reserved words.
///
/// The scanner walks it one byte at a time from the start of a symbol and
/// falls back to plain identifier scanning as soon as there is no edge for
/// the next byte.
#[derive(Debug)]
pub struct KeywordTrie {
    nodes: Vec<TrieNode>,
}

impl KeywordTrie {
    pub const ROOT: NodeId = 0;

    pub fn from_words(words: &[(&str, TokenKind)]) -> Self {
        let mut trie = KeywordTrie {
            nodes: vec![TrieNode::default()],
        };

        for (word, kind) in words {
            let mut node = Self::ROOT;

            for byte in word.bytes() {
                node = match trie.step(node, byte) {
                    Some(next) => next,
                    None => {
                        trie.nodes.push(TrieNode::default());
                        let next = trie.nodes.len() - 1;
                        trie.nodes[node].edges.push((byte, next));
                        next
                    }
                };
            }

            trie.nodes[node].kind = Some(*kind);
        }

        trie
    }

    /// Follows the edge labelled `byte` out of `node`, if there is one.
    pub fn step(&self, node: NodeId, byte: u8) -> Option<NodeId> {
        self.nodes[node]
            .edges
            .iter()
            .find(|(label, _)| *label == byte)
            .map(|(_, next)| *next)
    }

    /// The reserved kind completed at `node`, if any.
    pub fn kind(&self, node: NodeId) -> Option<TokenKind> {
        self.nodes[node].kind
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    ArrowSingle, // ->
    ArrowDouble, // =>
    Ampersand,
    BooleanLiteralFalse,
    BooleanLiteralTrue,
    BraceOpen,
    BraceClose,
    Break,
    Comma,
    Else,
    Enum,
    End,
    Equals,
    Fn,
    For,
    GreaterThan,
    If,
    IntegerLiteral,
    Let,
    Loop,
    Match,
    Minus,
    NilLiteral,
    ParenOpen,
    ParenClose,
    Period,
    Semicolon,
    Star,
    StringLiteralSingle,
    Struct,
    Symbol,
}

impl TokenKind {
    /// Fixed tag used when printing a token stream.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::ArrowSingle => "ARROW_SINGLE",
            TokenKind::ArrowDouble => "ARROW_DOUBLE",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::BooleanLiteralFalse => "BOOLEAN_LITERAL_FALSE",
            TokenKind::BooleanLiteralTrue => "BOOLEAN_LITERAL_TRUE",
            TokenKind::BraceOpen => "BRACE_OPEN",
            TokenKind::BraceClose => "BRACE_CLOSE",
            TokenKind::Break => "BREAK",
            TokenKind::Comma => "COMMA",
            TokenKind::Else => "ELSE",
            TokenKind::Enum => "ENUM",
            TokenKind::End => "END",
            TokenKind::Equals => "EQUALS",
            TokenKind::Fn => "FN",
            TokenKind::For => "FOR",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::If => "IF",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::Let => "LET",
            TokenKind::Loop => "LOOP",
            TokenKind::Match => "MATCH",
            TokenKind::Minus => "MINUS",
            TokenKind::NilLiteral => "NIL_LITERAL",
            TokenKind::ParenOpen => "PAREN_OPEN",
            TokenKind::ParenClose => "PAREN_CLOSE",
            TokenKind::Period => "PERIOD",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::StringLiteralSingle => "STRING_LITERAL_SINGLE",
            TokenKind::Struct => "STRUCT",
            TokenKind::Symbol => "SYMBOL",
        }
    }

    /// Kinds whose rendering includes the lexeme itself.
    fn renders_text(&self) -> bool {
        matches!(self, TokenKind::Symbol | TokenKind::StringLiteralSingle)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A classified lexeme borrowed from the source buffer. `value` holds the
/// raw bytes; [`Token::text`] is the lossy UTF-8 view used for printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a [u8],
    pub span: Span,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.renders_text() {
            write!(f, "{} {}", self.kind, self.text())
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl<'a> Token<'a> {
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.value)
    }

    /// Byte length of the lexeme.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.span.start.offset as usize
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }
}
