use std::rc::Rc;

use lazy_static::lazy_static;
use regex::bytes::Regex;
use tracing::{debug, trace};

use crate::{
    config::ErrorMode,
    errors::errors::{Error, ErrorImpl},
    Position, MK_SPAN, MK_TOKEN,
};

use super::tokens::{is_symbol_char, KeywordTrie, Token, TokenKind, RESERVED_TRIE};

lazy_static! {
    static ref SYMBOL_RUN: Regex = Regex::new("^[A-Za-z_]*").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Walks a borrowed source buffer and produces one token per call to
/// [`Scanner::next_token`].
///
/// The buffer is raw bytes; no encoding is assumed. A NUL byte or the end of
/// the buffer is end of input. Once reached, every further call returns a
/// zero-length `End` token at the same position.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
    panic: bool,
    mode: ErrorMode,
    file: Rc<String>,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new<S>(source: &'a S, file: Option<String>) -> Scanner<'a>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Scanner {
            source: source.as_ref(),
            pos: 0,
            line: 1,
            line_start: 0,
            panic: false,
            mode: ErrorMode::default(),
            file: file_name,
            finished: false,
        }
    }

    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.mode
    }

    /// Current 1-based line.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// True while the last scan reported an error and no token has been
    /// produced since. In halt mode this never clears.
    pub fn is_panicking(&self) -> bool {
        self.panic
    }

    /// Position of the cursor.
    pub fn here(&self) -> Position {
        Position {
            offset: self.pos as u32,
            line: self.line,
            column: (self.pos - self.line_start + 1) as u32,
        }
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        if self.panic && self.mode == ErrorMode::Halt {
            self.drain();
            return Ok(self.end_token());
        }

        self.skip_whitespace();
        let start = self.here();

        let result = match self.at() {
            0 => Ok(self.end_token()),
            b'0'..=b'9' => Ok(self.integer(start)),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.keyword_or_symbol(start)),
            b'\'' => self.string_literal(start),
            b'-' => Ok(self.single_or_double(start, TokenKind::Minus, TokenKind::ArrowSingle)),
            b'=' => Ok(self.single_or_double(start, TokenKind::Equals, TokenKind::ArrowDouble)),
            byte => match single_char_kind(byte) {
                Some(kind) => {
                    self.pos += 1;
                    Ok(self.make(kind, start))
                }
                None => Err(self.unrecognized()),
            },
        };

        match &result {
            Ok(token) => {
                trace!(kind = %token.kind, offset = token.offset(), line = token.line(), "token");
                self.panic = false;
            }
            Err(error) => {
                debug!(
                    error = %error,
                    mode = %self.mode,
                    resume_at = self.pos,
                    "lexical error"
                );
                self.panic = true;
            }
        }

        result
    }

    /// Byte at the cursor, or `0` past the end of the buffer.
    fn at(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn peek(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(0)
    }

    /// Consumes one byte, keeping the line counter in step.
    fn advance(&mut self) {
        if self.at() == b'\n' {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.at(), b' ' | b'\n') {
            self.advance();
        }
    }

    /// Moves the cursor to end of input.
    fn drain(&mut self) {
        while self.at() != 0 {
            self.advance();
        }
    }

    fn make(&self, kind: TokenKind, start: Position) -> Token<'a> {
        MK_TOKEN!(
            kind,
            &self.source[start.offset as usize..self.pos],
            MK_SPAN!(start, self.here())
        )
    }

    fn end_token(&self) -> Token<'a> {
        let here = self.here();
        MK_TOKEN!(TokenKind::End, &self.source[self.pos..self.pos], MK_SPAN!(here, here))
    }

    fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.here(), Rc::clone(&self.file))
    }

    fn integer(&mut self, start: Position) -> Token<'a> {
        let matched = DIGIT_RUN
            .find(&self.source[self.pos..])
            .map_or(0, |m| m.end());
        self.pos += matched;
        self.make(TokenKind::IntegerLiteral, start)
    }

    fn symbol(&mut self, start: Position) -> Token<'a> {
        let matched = SYMBOL_RUN
            .find(&self.source[self.pos..])
            .map_or(0, |m| m.end());
        self.pos += matched;
        self.make(TokenKind::Symbol, start)
    }

    /// Walks the keyword trie from the cursor. A keyword is emitted only when
    /// it is complete and not followed by another symbol character; any other
    /// outcome continues as a plain symbol from wherever the walk stopped.
    /// Every byte the walk consumed is a symbol character, so no backtracking
    /// is needed.
    fn keyword_or_symbol(&mut self, start: Position) -> Token<'a> {
        let mut node = KeywordTrie::ROOT;

        loop {
            let next = self.at();

            if let Some(kind) = RESERVED_TRIE.kind(node) {
                if !is_symbol_char(next) {
                    return self.make(kind, start);
                }
            }

            match RESERVED_TRIE.step(node, next) {
                Some(child) => {
                    self.pos += 1;
                    node = child;
                }
                None => return self.symbol(start),
            }
        }
    }

    fn single_or_double(&mut self, start: Position, single: TokenKind, double: TokenKind) -> Token<'a> {
        if self.peek() == b'>' {
            self.pos += 2;
            self.make(double, start)
        } else {
            self.pos += 1;
            self.make(single, start)
        }
    }

    fn string_literal(&mut self, start: Position) -> Result<Token<'a>, Error> {
        self.advance();

        loop {
            match self.at() {
                b'\'' => {
                    self.advance();
                    return Ok(self.make(TokenKind::StringLiteralSingle, start));
                }
                b'\\' => {
                    self.advance();
                    match self.at() {
                        b'0' => self.advance(),
                        0 => {
                            return Err(self.error(ErrorImpl::UnterminatedOrMissingInput {
                                construct: "an escape sequence",
                            }))
                        }
                        byte => {
                            let error = self.error(ErrorImpl::UnsupportedEscapeSequence { byte });
                            self.skip_string_rest();
                            return Err(error);
                        }
                    }
                }
                0 => {
                    return Err(self.error(ErrorImpl::UnterminatedStringLiteral {
                        opened_at_line: start.line,
                    }))
                }
                _ => self.advance(),
            }
        }
    }

    /// Steps over the offending escape byte and the rest of a broken literal,
    /// up to and including its closing quote.
    fn skip_string_rest(&mut self) {
        self.advance();
        while !matches!(self.at(), b'\'' | 0) {
            self.advance();
        }
        if self.at() == b'\'' {
            self.advance();
        }
    }

    fn unrecognized(&mut self) -> Error {
        let error = self.error(ErrorImpl::UnrecognizedCharacter { byte: self.at() });
        self.pos += 1;
        error
    }
}

fn single_char_kind(byte: u8) -> Option<TokenKind> {
    match byte {
        b'&' => Some(TokenKind::Ampersand),
        b'{' => Some(TokenKind::BraceOpen),
        b'}' => Some(TokenKind::BraceClose),
        b',' => Some(TokenKind::Comma),
        b'(' => Some(TokenKind::ParenOpen),
        b')' => Some(TokenKind::ParenClose),
        b'.' => Some(TokenKind::Period),
        b';' => Some(TokenKind::Semicolon),
        b'*' => Some(TokenKind::Star),
        _ => None,
    }
}

/// Yields every token up to and including the first `End`, then stops.
impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if let Ok(token) = &result {
            if token.kind == TokenKind::End {
                self.finished = true;
            }
        }

        Some(result)
    }
}

/// Scans `source` in halt mode, stopping at the first lexical error.
pub fn tokenize<S>(source: &S, file: Option<String>) -> Result<Vec<Token<'_>>, Error>
where
    S: AsRef<[u8]> + ?Sized,
{
    Scanner::new(source, file).collect()
}

/// Scans `source` in skip mode, collecting every token and every error.
pub fn tokenize_recovering<S>(source: &S, file: Option<String>) -> (Vec<Token<'_>>, Vec<Error>)
where
    S: AsRef<[u8]> + ?Sized,
{
    let mut tokens = vec![];
    let mut errors = vec![];

    for result in Scanner::new(source, file).with_error_mode(ErrorMode::Skip) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }

    (tokens, errors)
}
