use crate::error::{LexError, Span};
use crate::mode::{Mode, ModeStack};
use crate::rules::classify;
use crate::token::TokenCategory;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub category: TokenCategory,
    pub text: &'a str,
    pub span: Span,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {:?}", self.span.line, self.span.col, self.category, self.text)
    }
}

/// Scanning loop over one source text.
///
/// Yields one token per matched lexeme until the input is exhausted. A
/// character that no rule of the active mode accepts becomes a one-character
/// [`TokenCategory::Error`] token and scanning continues after it, so the
/// token texts always concatenate back to the source.
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    col: usize,
    modes: ModeStack,
    // Span of the delimiter that opened each mode above Root.
    openings: Vec<Span>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_modes(source, ModeStack::new())
    }

    /// Resumes scanning with a mode stack carried over from a previous chunk.
    pub fn with_modes(source: &'a str, modes: ModeStack) -> Self {
        let openings = vec![Span::new(1, 1, 0, 0); modes.depth()];
        Self {
            source,
            offset: 0,
            line: 1,
            col: 1,
            modes,
            openings,
        }
    }

    pub fn modes(&self) -> &ModeStack {
        &self.modes
    }

    pub fn into_modes(self) -> ModeStack {
        self.modes
    }

    /// True once the whole input was consumed and every construct was closed.
    pub fn is_terminated(&self) -> bool {
        self.offset == self.source.len() && self.modes.is_root()
    }

    /// The construct left open at end of input, if any.
    pub fn unterminated(&self) -> Option<LexError> {
        if self.offset < self.source.len() || self.modes.is_root() {
            return None;
        }

        let open_span = |opening: Option<&Span>| {
            let opening = opening.copied().unwrap_or_default();
            Span::new(opening.line, opening.col, opening.start, self.source.len())
        };

        let error = match self.modes.current() {
            Mode::StringLiteral => LexError::UnterminatedString {
                span: open_span(self.openings.last()),
            },
            Mode::CharLiteral => LexError::UnterminatedChar {
                span: open_span(self.openings.last()),
            },
            Mode::BlockComment => LexError::UnterminatedComment {
                depth: self.modes.depth(),
                span: open_span(self.openings.first()),
            },
            Mode::Root => return None,
        };

        debug!(error = %error, "input ended inside an open construct");
        Some(error)
    }

    fn advance(&mut self, text: &str) -> Span {
        let start = self.offset;
        let (line, col) = (self.line, self.col);

        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.offset += text.len();

        Span::new(line, col, start, self.offset)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.source[self.offset..];
        let ch = rest.chars().next()?;
        let depth = self.modes.depth();

        let (text, category) = match classify(rest, &mut self.modes) {
            Some(lexeme) => (lexeme.text, lexeme.category),
            None => {
                debug!(
                    ch = ?ch,
                    line = self.line,
                    col = self.col,
                    mode = %self.modes.current(),
                    "no rule matched"
                );
                (&rest[..ch.len_utf8()], TokenCategory::Error)
            }
        };

        let span = self.advance(text);

        if self.modes.depth() > depth {
            self.openings.push(span);
        } else if self.modes.depth() < depth {
            self.openings.pop();
        }

        Some(Token { category, text, span })
    }
}

/// Tokenizes the whole input. Never fails: unknown characters become
/// [`TokenCategory::Error`] tokens and an unterminated construct simply ends
/// at end of input under its current category.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Scanner::new(input).collect()
}

/// Like [`tokenize`], but rejects unknown characters and constructs left open
/// at end of input.
pub fn tokenize_strict(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::with_capacity(input.len() / 4);

    for token in scanner.by_ref() {
        if token.category == TokenCategory::Error {
            let ch = token.text.chars().next().unwrap_or_default();
            return Err(LexError::UnexpectedChar { ch, span: token.span });
        }
        tokens.push(token);
    }

    match scanner.unterminated() {
        Some(error) => Err(error),
        None => Ok(tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(input: &str) -> Vec<TokenCategory> {
        tokenize(input).iter().map(|t| t.category).collect()
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("let x\n  = 1;");

        assert_eq!(tokens[0].span, Span::new(1, 1, 0, 3));
        assert_eq!(tokens[2].text, "x");
        assert_eq!(tokens[2].span.col, 5);

        let eq = tokens.iter().find(|t| t.text == "=").unwrap();
        assert_eq!(eq.span.line, 2);
        assert_eq!(eq.span.col, 3);
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = tokenize("\"é\" x");
        let x = tokens.last().unwrap();
        assert_eq!(x.text, "x");
        assert_eq!(x.span.col, 5);
        assert_eq!(x.span.start, 5);
    }

    #[test]
    fn test_unknown_character_becomes_error_token() {
        let tokens = tokenize("a @ b");
        assert_eq!(tokens[2].category, TokenCategory::Error);
        assert_eq!(tokens[2].text, "@");
        assert_eq!(tokens[4].category, TokenCategory::Identifier);
    }

    #[test]
    fn test_error_token_is_whole_character() {
        let tokens = tokenize("λx");
        assert_eq!(tokens[0].text, "λ");
        assert_eq!(tokens[0].category, TokenCategory::Error);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_space_inside_char_literal_is_error() {
        assert_eq!(
            categories("' '"),
            vec![TokenCategory::StringLiteral, TokenCategory::Error, TokenCategory::StringLiteral]
        );
    }

    #[test]
    fn test_lone_dot_is_error() {
        assert_eq!(
            categories("a.b"),
            vec![TokenCategory::Identifier, TokenCategory::Error, TokenCategory::Identifier]
        );
    }

    #[test]
    fn test_unterminated_string_ends_quietly() {
        let mut scanner = Scanner::new("x = \"abc");
        let tokens: Vec<_> = scanner.by_ref().collect();

        assert_eq!(tokens.last().unwrap().text, "abc");
        assert_eq!(tokens.last().unwrap().category, TokenCategory::StringLiteral);
        assert!(!scanner.is_terminated());
        assert_eq!(scanner.modes().current(), Mode::StringLiteral);
    }

    #[test]
    fn test_strict_reports_unterminated_string_from_quote() {
        let err = tokenize_strict("x = \"abc").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { span: Span::new(1, 5, 4, 8) });
    }

    #[test]
    fn test_strict_reports_outermost_comment() {
        let err = tokenize_strict("a /* b\n /* c */").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedComment { depth: 1, span: Span::new(1, 3, 2, 15) }
        );
    }

    #[test]
    fn test_strict_reports_unterminated_char() {
        assert!(matches!(tokenize_strict("'a"), Err(LexError::UnterminatedChar { .. })));
    }

    #[test]
    fn test_strict_rejects_unknown_character() {
        let err = tokenize_strict("let a = #1;").unwrap_err();
        assert_eq!(err, LexError::UnexpectedChar { ch: '#', span: Span::new(1, 9, 8, 9) });
    }

    #[test]
    fn test_strict_accepts_clean_input() {
        let tokens = tokenize_strict("fn main() { return 0; }").unwrap();
        assert_eq!(tokens[2].category, TokenCategory::FunctionName);
    }

    #[test]
    fn test_resume_with_carried_modes() {
        let mut first = Scanner::new("x /* open\n");
        let head: Vec<_> = first.by_ref().collect();
        assert_eq!(head.last().unwrap().category, TokenCategory::BlockComment);

        let modes = first.into_modes();
        assert_eq!(modes.current(), Mode::BlockComment);

        let mut second = Scanner::with_modes("still */ y", modes);
        let tail: Vec<_> = second.by_ref().collect();
        assert_eq!(tail[0].text, "still ");
        assert_eq!(tail[1].text, "*/");
        assert_eq!(tail.last().unwrap().category, TokenCategory::Identifier);
        assert!(second.is_terminated());
    }

    #[test]
    fn test_resumed_unterminated_comment_points_at_chunk_start() {
        let mut modes = ModeStack::new();
        modes.push(Mode::BlockComment);
        let mut scanner = Scanner::with_modes("more", modes);
        for _ in scanner.by_ref() {}

        assert_eq!(
            scanner.unterminated(),
            Some(LexError::UnterminatedComment { depth: 1, span: Span::new(1, 1, 0, 4) })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(Scanner::new("").is_terminated());
    }
}
