#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod source;

/// A location in the source buffer. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns `(line number, line text, offset within the line)` for a byte
/// offset. The line text does not include its trailing newline. Offsets at or
/// past the end of `content` resolve to the last line.
pub fn get_line_at_position(content: &[u8], position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len());

    let before = &content[..pos];
    let line_start = before.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
    let line_end = content[pos..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(content.len(), |i| pos + i);
    let line_number = before.iter().filter(|b| **b == b'\n').count() + 1;

    (
        line_number,
        String::from_utf8_lossy(&content[line_start..line_end]).into_owned(),
        pos - line_start,
    )
}

pub fn format_error(error: &Error, source: &[u8]) -> String {
    /*
        Error: name (tip)
        -> main.clx
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", error.get_file()));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.bytes().take_while(|b| *b == b' ').count();

    (String::from(&string[start..]), start)
}
