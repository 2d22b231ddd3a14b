//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span between two positions

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The lexeme, borrowed from the source buffer
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, &source[0..2], span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a Span from a start and end Position.
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr) => {
        $crate::Span {
            start: $start,
            end: $end,
        }
    };
}
