//! # Stride Syntax
//!
//! Token classification for the Stride language, intended for syntax
//! highlighting.
//!
//! ## Overview
//!
//! - **Rules**: ordered pattern tables, one per lexer mode; first match wins
//! - **Modes**: an explicit [`ModeStack`] tracks nested block comments and
//!   string/character literals
//! - **Scanner**: the loop that drives the rules over a source text and
//!   yields spanned tokens
//! - **Language**: name, alias and filename patterns a host uses to select
//!   these rules
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     ↓
//! Scanner ──▶ classify(rest, &mut ModeStack)
//!     ↓
//! Vec<Token> (category + text + span)
//!     ↓
//! Host (theme lookup via TokenCategory::scope)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stride_syntax::{tokenize, TokenCategory};
//!
//! let tokens = tokenize("fn main() { return 0x1F; }");
//!
//! assert_eq!(tokens[0].category, TokenCategory::Keyword);
//! assert_eq!(tokens[2].category, TokenCategory::FunctionName);
//!
//! // Token texts always reassemble the input.
//! let rebuilt: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(rebuilt, "fn main() { return 0x1F; }");
//! ```
//!
//! ## Error Handling
//!
//! [`tokenize`] never fails. [`tokenize_strict`] reports characters outside
//! the grammar and constructs left open at end of input:
//!
//! ```rust
//! use stride_syntax::{tokenize_strict, LexError};
//!
//! let error = tokenize_strict("let s = \"open").unwrap_err();
//! assert!(matches!(error, LexError::UnterminatedString { .. }));
//! assert_eq!((error.span().line, error.span().col), (1, 9));
//! ```

pub mod error;
pub mod language;
pub mod lexer;
pub mod mode;
pub mod rules;
pub mod token;

pub use error::{LexError, Span};
pub use language::{LanguageInfo, STRIDE, find_language};
pub use lexer::{Scanner, Token, tokenize, tokenize_strict};
pub use mode::{Mode, ModeStack};
pub use rules::{KEYWORDS, Lexeme, classify, is_keyword};
pub use token::TokenCategory;
