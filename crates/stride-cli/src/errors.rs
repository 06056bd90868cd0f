use colored::*;
use std::fmt;
use stride_syntax::{LexError, Span};

/// Error with source context, rendered for humans on stderr.
pub struct CliError {
    pub message: String,
    pub span: Option<Span>,
    pub file: Option<String>,
    pub source: Option<String>,
    pub help: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            file: None,
            source: None,
            help: None,
        }
    }

    pub fn from_lex(error: &LexError, file: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(error.to_string())
            .with_span(error.span())
            .with_file(file)
            .with_source(source)
            .with_help(error.help())
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{}", self.render());
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} {}", "error:".red().bold(), self.message.bold());

        if let (Some(file), Some(span)) = (&self.file, &self.span) {
            out.push_str(&format!("\n  {} {}:{}:{}", "-->".blue().bold(), file, span.line, span.col));
        }

        if let (Some(source), Some(span)) = (&self.source, &self.span) {
            out.push('\n');
            out.push_str(&self.render_source_with_span(source, span));
        }

        if let Some(help) = &self.help {
            out.push_str(&format!("\n{} {}", "help:".cyan().bold(), help));
        }

        out
    }

    fn render_source_with_span(&self, source: &str, span: &Span) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let line_idx = span.line.saturating_sub(1);

        if line_idx >= lines.len() {
            return String::new();
        }

        let max_line = (span.line + 2).min(lines.len());
        let line_num_width = max_line.to_string().len();

        // Two lines of context either side.
        let start = line_idx.saturating_sub(2);
        let end = (line_idx + 3).min(lines.len());

        let mut out = String::new();
        for (i, line) in lines.iter().enumerate().take(end).skip(start) {
            let line_num = i + 1;

            if line_num == span.line {
                out.push_str(&format!(
                    "\n{:>width$} {} {}",
                    line_num.to_string().blue().bold(),
                    "|".blue().bold(),
                    line,
                    width = line_num_width
                ));

                let spaces = " ".repeat(span.col.saturating_sub(1));
                let rest = line.chars().count().saturating_sub(span.col.saturating_sub(1));
                let caret_len = source
                    .get(span.start..span.end)
                    .map(|text| text.chars().take_while(|&c| c != '\n').count())
                    .unwrap_or(1)
                    .min(rest)
                    .max(1);
                out.push_str(&format!(
                    "\n{:>width$} {} {}{}",
                    "",
                    "|".blue().bold(),
                    spaces,
                    "^".repeat(caret_len).red().bold(),
                    width = line_num_width
                ));
            } else {
                out.push_str(&format!(
                    "\n{:>width$} {} {}",
                    line_num.to_string().dimmed(),
                    "|".blue().bold(),
                    line,
                    width = line_num_width
                ));
            }
        }

        out
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CliError: {}", self.message)
    }
}

impl std::error::Error for CliError {}
