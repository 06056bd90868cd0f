use serde::Serialize;
use std::fmt;

/// Location of a token: 1-based line and column (in characters) plus the
/// byte range it covers in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub line: usize,
    pub col: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, col: usize, start: usize, end: usize) -> Self {
        Self { line, col, start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnexpectedChar { ch: char, span: Span },
    UnterminatedString { span: Span },
    UnterminatedChar { span: Span },
    UnterminatedComment { depth: usize, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::UnterminatedChar { span } => *span,
            LexError::UnterminatedComment { span, .. } => *span,
        }
    }

    /// Short hint shown under a rendered diagnostic.
    pub fn help(&self) -> &'static str {
        match self {
            LexError::UnexpectedChar { .. } => {
                "this character is not part of Stride's lexical grammar"
            }
            LexError::UnterminatedString { .. } => "add a closing '\"' to end the string",
            LexError::UnterminatedChar { .. } => "add a closing '\\'' to end the character literal",
            LexError::UnterminatedComment { .. } => "every '/*' needs a matching '*/'",
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, .. } => {
                write!(f, "unexpected character '{}'", ch.escape_default())
            }
            LexError::UnterminatedString { .. } => {
                write!(f, "unterminated string literal")
            }
            LexError::UnterminatedChar { .. } => {
                write!(f, "unterminated character literal")
            }
            LexError::UnterminatedComment { depth, .. } => {
                if *depth > 1 {
                    write!(f, "unterminated block comment ({} levels open)", depth)
                } else {
                    write!(f, "unterminated block comment")
                }
            }
        }
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_comment_message() {
        let err = LexError::UnterminatedComment { depth: 2, span: Span::default() };
        assert_eq!(err.to_string(), "unterminated block comment (2 levels open)");
    }

    #[test]
    fn test_span_and_help_follow_variant() {
        let span = Span::new(3, 2, 20, 21);
        let err = LexError::UnexpectedChar { ch: '@', span };
        assert_eq!(err.span(), span);
        assert_eq!(err.to_string(), "unexpected character '@'");
        assert!(err.help().contains("lexical grammar"));
    }
}
