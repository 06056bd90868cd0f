//! Ordered classification rules for each lexer mode.
//!
//! Every mode owns a list of anchored patterns tried in declaration order; the
//! first pattern that matches at the start of the remaining input wins. Several
//! patterns overlap, so the order below is load-bearing:
//!
//! - keywords before function names before plain identifiers
//! - floats before hex literals before plain integers
//! - `/*` before the operator run, otherwise `/*` would read as an operator

use crate::mode::{Mode, ModeStack};
use crate::token::TokenCategory;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

/// Reserved words, primitive type names, boolean literals and `nil`.
pub const KEYWORDS: &[&str] = &[
    "let", "const", "fn", "if", "else", "while", "for", "return", "break", "continue", "struct",
    "enum", "case", "default", "import", "nil", "class", "this", "public", "module", "package",
    "extern", "override", "as", "async", "do", "switch", "try", "catch", "throw", "new", "bool",
    "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "char", "string", "void",
    "auto", "true", "false", "mut",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());

pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word)
}

const IDENTIFIER: &str = r"[a-zA-Z_]\w*";
const ESCAPE: &str = r#"\\(?:[abfnrtv\\"']|x[0-9A-Fa-f]{1,4}|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})"#;

/// What a successful match does to the mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(Mode),
    Pop,
}

impl Transition {
    fn apply(self, modes: &mut ModeStack) {
        match self {
            Transition::Stay => {}
            Transition::Push(mode) => {
                modes.push(mode);
                trace!(%mode, depth = modes.depth(), "enter mode");
            }
            Transition::Pop => {
                if let Some(mode) = modes.pop() {
                    trace!(%mode, depth = modes.depth(), "leave mode");
                }
            }
        }
    }
}

pub struct Rule {
    pattern: Regex,
    lookahead: Option<Regex>,
    pub category: TokenCategory,
    pub transition: Transition,
}

impl Rule {
    fn new(pattern: &str, category: TokenCategory, transition: Transition) -> Self {
        Self {
            pattern: anchored(pattern),
            lookahead: None,
            category,
            transition,
        }
    }

    fn stay(pattern: &str, category: TokenCategory) -> Self {
        Self::new(pattern, category, Transition::Stay)
    }

    /// Requires `lookahead` to match right after the lexeme without consuming it.
    fn followed_by(mut self, lookahead: &str) -> Self {
        self.lookahead = Some(anchored(lookahead));
        self
    }

    /// Length in bytes of the lexeme this rule accepts at the start of `input`.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        let end = self.pattern.find(input).map(|m| m.end()).filter(|&end| end > 0)?;

        if let Some(lookahead) = &self.lookahead
            && !lookahead.is_match(&input[end..])
        {
            return None;
        }

        Some(end)
    }
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})", pattern)).unwrap()
}

static ROOT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let keywords = KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        Rule::stay(r"\s+", TokenCategory::Whitespace),
        Rule::stay(r"//[^\n]*\n?", TokenCategory::LineComment),
        Rule::new(r"/\*", TokenCategory::BlockComment, Transition::Push(Mode::BlockComment)),
        Rule::stay(&format!(r"(?:{})\b", keywords), TokenCategory::Keyword),
        Rule::stay(IDENTIFIER, TokenCategory::FunctionName).followed_by(r"\s*\("),
        Rule::stay(IDENTIFIER, TokenCategory::Identifier),
        Rule::stay(r"\d*\.\d+(?:[eE][-+]?\d+)?[dD]?", TokenCategory::FloatLiteral),
        Rule::stay(r"0[xX][0-9a-fA-F]+", TokenCategory::HexLiteral),
        Rule::stay(r"\d+[lL]?", TokenCategory::IntegerLiteral),
        Rule::new("\"", TokenCategory::StringLiteral, Transition::Push(Mode::StringLiteral)),
        Rule::new("'", TokenCategory::StringLiteral, Transition::Push(Mode::CharLiteral)),
        Rule::stay(r"[{}()\[\]]", TokenCategory::Punctuation),
        Rule::stay(r"[;,]", TokenCategory::Punctuation),
        Rule::stay(r"[=><!~?:&|+*/^%-]+", TokenCategory::Operator),
    ]
});

static BLOCK_COMMENT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::stay(r"[^/*]+", TokenCategory::BlockComment),
        Rule::new(r"/\*", TokenCategory::BlockComment, Transition::Push(Mode::BlockComment)),
        Rule::new(r"\*/", TokenCategory::BlockComment, Transition::Pop),
        Rule::stay(r"[/*]", TokenCategory::BlockComment),
    ]
});

static STRING_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::stay(r#"[^\\"]+"#, TokenCategory::StringLiteral),
        Rule::stay(ESCAPE, TokenCategory::StringEscape),
        Rule::stay(r"\\.", TokenCategory::StringEscape),
        Rule::new("\"", TokenCategory::StringLiteral, Transition::Pop),
    ]
});

// A space ends the ordinary run so a lone `'` after it can still close.
static CHAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::stay(r"[^\\ ']+", TokenCategory::StringLiteral),
        Rule::stay(ESCAPE, TokenCategory::StringEscape),
        Rule::stay(r"\\.", TokenCategory::StringEscape),
        Rule::new("'", TokenCategory::StringLiteral, Transition::Pop),
    ]
});

pub fn rules_for(mode: Mode) -> &'static [Rule] {
    match mode {
        Mode::Root => &ROOT_RULES,
        Mode::BlockComment => &BLOCK_COMMENT_RULES,
        Mode::StringLiteral => &STRING_RULES,
        Mode::CharLiteral => &CHAR_RULES,
    }
}

/// A matched prefix of the input together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub text: &'a str,
    pub category: TokenCategory,
}

/// Classifies the next lexeme of `input` under the innermost mode of `modes`
/// and applies the matching rule's transition to `modes`.
///
/// Returns `None` for empty input or when no rule of the active mode matches;
/// `modes` is left untouched in that case.
pub fn classify<'a>(input: &'a str, modes: &mut ModeStack) -> Option<Lexeme<'a>> {
    if input.is_empty() {
        return None;
    }

    let (rule, len) = rules_for(modes.current())
        .iter()
        .find_map(|rule| rule.match_len(input).map(|len| (rule, len)))?;

    rule.transition.apply(modes);

    Some(Lexeme {
        text: &input[..len],
        category: rule.category,
    })
}
