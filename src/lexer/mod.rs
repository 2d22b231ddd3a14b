//! Lexical analysis module.
//!
//! This module contains the scanner that converts a source buffer into a
//! stream of tokens for parsing. It handles:
//!
//! - Keyword recognition through a prefix trie with identifier fallback
//! - Integer and single-quoted string literals
//! - Punctuation and the two arrow operators
//! - Line tracking and recoverable lexical errors

pub mod lexer;
pub mod tokens;
