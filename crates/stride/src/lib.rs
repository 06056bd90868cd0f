pub use stride_syntax::{
    KEYWORDS, LexError, Mode, ModeStack, STRIDE, Scanner, Span, Token, TokenCategory, classify,
    find_language, tokenize, tokenize_strict,
};
pub use stride_syntax;

pub mod prelude {
    pub use crate::{KEYWORDS, STRIDE, Scanner, TokenCategory, tokenize, tokenize_strict};
    pub use crate::{LexError, Token};
}
