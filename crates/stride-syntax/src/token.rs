use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic class attached to a matched span of Stride source.
///
/// Categories carry no payload. Hosts map them to visual styles, usually
/// through [`TokenCategory::scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Whitespace,
    LineComment,
    BlockComment,
    Keyword,
    FunctionName,
    Identifier,
    FloatLiteral,
    HexLiteral,
    IntegerLiteral,
    StringLiteral,
    StringEscape,
    CharLiteral,
    CharEscape,
    Punctuation,
    Operator,
    /// A character no rule of the active mode accepts.
    Error,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 16] = [
        TokenCategory::Whitespace,
        TokenCategory::LineComment,
        TokenCategory::BlockComment,
        TokenCategory::Keyword,
        TokenCategory::FunctionName,
        TokenCategory::Identifier,
        TokenCategory::FloatLiteral,
        TokenCategory::HexLiteral,
        TokenCategory::IntegerLiteral,
        TokenCategory::StringLiteral,
        TokenCategory::StringEscape,
        TokenCategory::CharLiteral,
        TokenCategory::CharEscape,
        TokenCategory::Punctuation,
        TokenCategory::Operator,
        TokenCategory::Error,
    ];

    /// Stable snake_case name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            TokenCategory::Whitespace => "whitespace",
            TokenCategory::LineComment => "line_comment",
            TokenCategory::BlockComment => "block_comment",
            TokenCategory::Keyword => "keyword",
            TokenCategory::FunctionName => "function_name",
            TokenCategory::Identifier => "identifier",
            TokenCategory::FloatLiteral => "float_literal",
            TokenCategory::HexLiteral => "hex_literal",
            TokenCategory::IntegerLiteral => "integer_literal",
            TokenCategory::StringLiteral => "string_literal",
            TokenCategory::StringEscape => "string_escape",
            TokenCategory::CharLiteral => "char_literal",
            TokenCategory::CharEscape => "char_escape",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Operator => "operator",
            TokenCategory::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    /// Highlighting scope in the dotted form editors use for theming.
    pub fn scope(self) -> &'static str {
        match self {
            TokenCategory::Whitespace => "text.whitespace",
            TokenCategory::LineComment => "comment.line.double-slash",
            TokenCategory::BlockComment => "comment.block",
            TokenCategory::Keyword => "keyword",
            TokenCategory::FunctionName => "entity.name.function",
            TokenCategory::Identifier => "variable.other",
            TokenCategory::FloatLiteral => "constant.numeric.float",
            TokenCategory::HexLiteral => "constant.numeric.hex",
            TokenCategory::IntegerLiteral => "constant.numeric.integer",
            TokenCategory::StringLiteral => "string.quoted.double",
            TokenCategory::StringEscape => "constant.character.escape",
            TokenCategory::CharLiteral => "string.quoted.single",
            TokenCategory::CharEscape => "constant.character.escape",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Operator => "keyword.operator",
            TokenCategory::Error => "invalid.illegal",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips_for_every_category() {
        for category in TokenCategory::ALL {
            assert_eq!(TokenCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(TokenCategory::from_name("comment"), None);
    }

    #[test]
    fn test_serializes_as_snake_case_name() {
        let json = serde_json::to_string(&TokenCategory::FunctionName).unwrap();
        assert_eq!(json, "\"function_name\"");

        let back: TokenCategory = serde_json::from_str("\"hex_literal\"").unwrap();
        assert_eq!(back, TokenCategory::HexLiteral);
    }
}
