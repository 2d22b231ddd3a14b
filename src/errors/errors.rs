use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    file: Rc<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, file: Rc<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            file,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    /// Line on which the scanner detected the error.
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// The offending byte, for errors caused by a specific one.
    pub fn byte(&self) -> Option<u8> {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { byte } => Some(*byte),
            ErrorImpl::UnsupportedEscapeSequence { byte } => Some(*byte),
            ErrorImpl::UnterminatedStringLiteral { .. }
            | ErrorImpl::UnterminatedOrMissingInput { .. } => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedStringLiteral { .. } => "UnterminatedStringLiteral",
            ErrorImpl::UnsupportedEscapeSequence { .. } => "UnsupportedEscapeSequence",
            ErrorImpl::UnterminatedOrMissingInput { .. } => "UnterminatedOrMissingInput",
            ErrorImpl::UnrecognizedCharacter { .. } => "UnrecognizedCharacter",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedStringLiteral { opened_at_line } => ErrorTip::Suggestion(format!(
                "String literal opened on line {} is missing its closing `'`",
                opened_at_line
            )),
            ErrorImpl::UnsupportedEscapeSequence { byte } => ErrorTip::Suggestion(format!(
                "Only `\\0` is a supported escape sequence, found `\\{}`",
                escaped(byte)
            )),
            ErrorImpl::UnterminatedOrMissingInput { construct } => ErrorTip::Suggestion(format!(
                "Input ended in the middle of {}",
                construct
            )),
            ErrorImpl::UnrecognizedCharacter { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.position.line, self.position.column, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unterminated string literal (opened on line {opened_at_line})")]
    UnterminatedStringLiteral { opened_at_line: u32 },
    #[error("unsupported escape sequence: `\\{}`", escaped(.byte))]
    UnsupportedEscapeSequence { byte: u8 },
    #[error("unexpected end of input in {construct}")]
    UnterminatedOrMissingInput { construct: &'static str },
    #[error("unrecognized character: `{}`", escaped(.byte))]
    UnrecognizedCharacter { byte: u8 },
}

/// Printable form of a source byte: `#`, `\t`, `\xe9`.
fn escaped(byte: &u8) -> String {
    std::ascii::escape_default(*byte).to_string()
}
