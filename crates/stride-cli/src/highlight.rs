use anyhow::{Result, anyhow};
use colored::{Color, ColoredString, Colorize};
use std::collections::{BTreeMap, HashMap};
use stride_syntax::{Token, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    const fn plain() -> Self {
        Self { color: None, bold: false, italic: false }
    }

    const fn fg(color: Color) -> Self {
        Self { color: Some(color), bold: false, italic: false }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        let mut painted = ColoredString::from(text);
        if let Some(color) = self.color {
            painted = painted.color(color);
        }
        if self.bold {
            painted = painted.bold();
        }
        if self.italic {
            painted = painted.italic();
        }
        painted
    }
}

/// Maps token categories to terminal styles.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<TokenCategory, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        use TokenCategory::*;

        let styles = [
            (Whitespace, Style::plain()),
            (LineComment, Style::fg(Color::BrightBlack).italic()),
            (BlockComment, Style::fg(Color::BrightBlack).italic()),
            (Keyword, Style::fg(Color::Magenta).bold()),
            (FunctionName, Style::fg(Color::Blue)),
            (Identifier, Style::plain()),
            (FloatLiteral, Style::fg(Color::Yellow)),
            (HexLiteral, Style::fg(Color::Yellow)),
            (IntegerLiteral, Style::fg(Color::Yellow)),
            (StringLiteral, Style::fg(Color::Green)),
            (StringEscape, Style::fg(Color::Cyan)),
            (CharLiteral, Style::fg(Color::Green)),
            (CharEscape, Style::fg(Color::Cyan)),
            (Punctuation, Style::plain()),
            (Operator, Style::fg(Color::BrightWhite)),
            (Error, Style::fg(Color::Red).bold()),
        ]
        .into_iter()
        .collect();

        Self { styles }
    }
}

impl Theme {
    /// Built-in theme with the `[theme]` table of a config file applied.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut theme = Theme::default();

        for (name, color) in overrides {
            let category = TokenCategory::from_name(name)
                .ok_or_else(|| anyhow!("Unknown token category '{}'", name))?;
            let color = parse_color(color)?;
            theme.styles.entry(category).or_default().color = Some(color);
        }

        Ok(theme)
    }

    pub fn style(&self, category: TokenCategory) -> Style {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    /// Paints every token, restarting the style on each line so multi-line
    /// comments and strings survive pagers that reset attributes per line.
    pub fn render(&self, tokens: &[Token<'_>]) -> String {
        let mut output = String::new();

        for token in tokens {
            let style = self.style(token.category);
            for piece in token.text.split_inclusive('\n') {
                let (body, newline) = match piece.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (piece, ""),
                };
                if !body.is_empty() {
                    output.push_str(&style.paint(body).to_string());
                }
                output.push_str(newline);
            }
        }

        output
    }
}

pub fn parse_color(name: &str) -> Result<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6
            && let Ok(rgb) = u32::from_str_radix(hex, 16)
        {
            return Ok(Color::TrueColor {
                r: (rgb >> 16) as u8,
                g: (rgb >> 8) as u8,
                b: rgb as u8,
            });
        }
        return Err(anyhow!("Invalid hex color '{}'", name));
    }

    let color = match name.to_ascii_lowercase().replace(' ', "_").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright_black" | "gray" | "grey" => Color::BrightBlack,
        "bright_red" => Color::BrightRed,
        "bright_green" => Color::BrightGreen,
        "bright_yellow" => Color::BrightYellow,
        "bright_blue" => Color::BrightBlue,
        "bright_magenta" => Color::BrightMagenta,
        "bright_cyan" => Color::BrightCyan,
        "bright_white" => Color::BrightWhite,
        _ => return Err(anyhow!("Unknown color '{}'", name)),
    };

    Ok(color)
}

#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_syntax::tokenize;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Bright Blue").unwrap(), Color::BrightBlue);
        assert_eq!(parse_color("grey").unwrap(), Color::BrightBlack);
        assert_eq!(
            parse_color("#ff8800").unwrap(),
            Color::TrueColor { r: 0xff, g: 0x88, b: 0x00 }
        );
        assert!(parse_color("#ff88").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    #[test]
    fn test_overrides_replace_color_only() {
        let overrides = BTreeMap::from([("keyword".to_string(), "red".to_string())]);
        let theme = Theme::with_overrides(&overrides).unwrap();

        let style = theme.style(TokenCategory::Keyword);
        assert_eq!(style.color, Some(Color::Red));
        assert!(style.bold);
        assert_eq!(theme.style(TokenCategory::FunctionName).color, Some(Color::Blue));
    }

    #[test]
    fn test_render_keeps_text_and_styles_each_line() {
        colored::control::set_override(true);

        let source = "fn f() {}\n/* a\nb */";
        let tokens = tokenize(source);
        let rendered = Theme::default().render(&tokens);

        let stripped: String = strip_ansi(&rendered);
        assert_eq!(stripped, source);
        assert!(rendered.contains("\x1b["));
        for line in rendered.lines().skip(1) {
            assert!(line.starts_with("\x1b["), "line {line:?} is not styled");
        }
    }
}
