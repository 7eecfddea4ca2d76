//! Lexer
//!
//! Turns a McPAT report into a flat sequence of [`LexedLine`]s, one per line, each
//! carrying its indentation depth and 1-based line number.
//!
//! Lexing is strictly line based: every line is classified on its own by
//! [`line_classification::classify_line`]. The only cross-line state is the depth of
//! blank lines, which inherit the depth of the line before them so that a blank line
//! inside a block never closes that block.
//!
//! A line that no rule accepts is a hard error ([`UnknownLineError`]); the report is
//! never silently partially lexed.

pub mod line_classification;
pub mod tokens;
pub mod value_scanner;

pub use line_classification::classify_line;
pub use tokens::{LexedLine, Token, TokenKind};
pub use value_scanner::{parse_quantity, Quantity};

use std::fmt;

/// A report line that fits none of the token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLineError {
    /// 1-based line number
    pub line_number: usize,
    /// The offending line, without its terminator
    pub line: String,
}

impl fmt::Display for UnknownLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown line {}: no token kind matches {:?}",
            self.line_number, self.line
        )
    }
}

impl std::error::Error for UnknownLineError {}

/// Number of leading whitespace characters.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Tokenize a whole report.
pub fn tokenize(source: &str) -> Result<Vec<LexedLine>, UnknownLineError> {
    let mut lines = Vec::new();
    let mut previous_depth = 0;

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let line_number = index + 1;

        let token = classify_line(line).ok_or_else(|| UnknownLineError {
            line_number,
            line: line.to_string(),
        })?;

        let depth = if token.kind == TokenKind::Paragraph {
            previous_depth
        } else {
            leading_whitespace(line)
        };
        previous_depth = depth;

        clilog::debug!(LEX_LINE, "line {} depth {}: {}", line_number, depth, token);
        lines.push(LexedLine {
            depth,
            line_number,
            token,
        });
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_depths_and_line_numbers() {
        let lines = tokenize("Core:\n  Area = 1.2 mm^2\n    Peak Dynamic = 0.5 W\n").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines.iter().map(|l| l.depth).collect::<Vec<_>>(),
            vec![0, 2, 4]
        );
        assert_eq!(
            lines.iter().map(|l| l.line_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_blank_line_inherits_previous_depth() {
        let lines = tokenize("Core:\n    Area = 1.2 mm^2\n\nL2\n").unwrap();
        assert_eq!(lines[2].token.kind, TokenKind::Paragraph);
        assert_eq!(lines[2].depth, 4);
        assert_eq!(lines[3].depth, 0);
    }

    #[test]
    fn test_leading_blank_line_has_depth_zero() {
        let lines = tokenize("\nCore:\n").unwrap();
        assert_eq!(lines[0].depth, 0);
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let lines = tokenize("Core:\r\n  Area = 1.2 mm^2\r\n").unwrap();
        assert_eq!(lines[0].token, Token::label(TokenKind::Component, "Core"));
        assert_eq!(
            lines[1].token,
            Token::pair(TokenKind::Attribute, "Area", "1.2 mm^2")
        );
    }

    #[test]
    fn test_unknown_line_reports_position() {
        let err = tokenize("Core:\n  Area = 1.2 mm^2\n@@@\n").unwrap_err();
        assert_eq!(err.line_number, 3);
        assert_eq!(err.line, "@@@");
        assert!(err.to_string().contains("Unknown line 3"));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }
}
