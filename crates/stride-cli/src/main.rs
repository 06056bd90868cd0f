//! # stride-cli
//!
//! Command-line host for the Stride token classifier: highlights `.sr` files in
//! the terminal, dumps token streams for inspection and checks sources for
//! characters outside the grammar or unterminated literals and comments.

mod config;
mod errors;
mod highlight;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use stride::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use errors::CliError;
use highlight::Theme;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Syntax highlighter and token inspector for Stride sources", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log classification details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of searching for .striderc
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print sources with syntax highlighting")]
    Highlight {
        /// Files to highlight, `-` reads stdin
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Process files that do not match *.sr
        #[arg(long)]
        force: bool,
    },
    #[command(about = "Dump the token stream of a source file")]
    Tokens {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Leave whitespace tokens out
        #[arg(long)]
        skip_whitespace: bool,
    },
    #[command(about = "Report unknown characters and unterminated literals or comments")]
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    #[command(about = "Show the language registration and token categories")]
    Info,
    #[command(about = "Write a default config file")]
    InitConfig {
        #[arg(default_value = ".striderc.toml")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("{} Failed to load config: {}", "⚠".yellow().bold(), e);
            Config::default()
        }),
    };

    let skip_whitespace = matches!(cli.command, Commands::Tokens { skip_whitespace: true, .. });
    config.merge_cli_args(cli.no_color, skip_whitespace);

    if !config.colored {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Highlight { files, force } => highlight_files(&files, force, &config),
        Commands::Tokens { file, format, .. } => {
            let (_, source) = read_source(&file)?;
            print!("{}", render_tokens(&source, format, config.skip_whitespace)?);
            Ok(())
        }
        Commands::Check { files, force } => {
            let failures = check_files(&files, force);
            if failures > 0 {
                eprintln!();
                eprintln!(
                    "{} {}",
                    "✗".red().bold(),
                    format!("{} of {} files failed", failures, files.len()).red().bold()
                );
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Info => {
            print_info();
            Ok(())
        }
        Commands::InitConfig { path } => {
            Config::create_default(&path)?;
            println!("{} Created {}", "✓".green().bold(), path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("STRIDE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> Result<(String, String)> {
    read_source_from(path, io::stdin())
}

/// Reads `path`, or `stdin` when the path is `-`.
fn read_source_from(path: &Path, mut stdin: impl Read) -> Result<(String, String)> {
    if path == Path::new("-") {
        let mut source = String::new();
        stdin
            .read_to_string(&mut source)
            .context("Failed to read source from stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source from {}", path.display()))?;
    Ok((path.display().to_string(), source))
}

fn ensure_stride_file(path: &Path, force: bool) -> Result<()> {
    if force || path == Path::new("-") || STRIDE.matches_filename(path) {
        return Ok(());
    }
    bail!(
        "{} does not look like a {} source (expected {}); pass --force to process it anyway",
        path.display(),
        STRIDE.name,
        STRIDE.filenames.join(", ")
    )
}

fn highlight_files(files: &[PathBuf], force: bool, config: &Config) -> Result<()> {
    let theme = Theme::with_overrides(&config.theme)?;

    for path in files {
        ensure_stride_file(path, force)?;
        let (name, source) = read_source(path)?;

        let mut scanner = Scanner::new(&source);
        let tokens: Vec<_> = scanner.by_ref().collect();
        if let Some(error) = scanner.unterminated() {
            debug!(file = %name, %error, "highlighting stopped inside an open construct");
        }
        info!(file = %name, tokens = tokens.len(), "highlighted");

        if files.len() > 1 {
            println!("{}", format!("==> {} <==", name).bold());
        }
        print!("{}", theme.render(&tokens));
        if !source.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

fn render_tokens(source: &str, format: Format, skip_whitespace: bool) -> Result<String> {
    let tokens: Vec<_> = tokenize(source)
        .into_iter()
        .filter(|t| !(skip_whitespace && t.category == TokenCategory::Whitespace))
        .collect();

    let mut out = String::new();
    match format {
        Format::Json => {
            out.push_str(&serde_json::to_string_pretty(&tokens)?);
            out.push('\n');
        }
        Format::Text => {
            for token in &tokens {
                let position = format!("{}:{}", token.span.line, token.span.col);
                let category = format!("{:<16}", token.category.name());
                let category = if token.category == TokenCategory::Error {
                    category.red().bold()
                } else {
                    category.cyan()
                };
                out.push_str(&format!("{:>8}  {} {:?}\n", position.dimmed(), category, token.text));
            }
        }
    }

    Ok(out)
}

/// Strictly tokenizes one source, returning its token count.
fn check_source(name: &str, source: &str) -> Result<usize, CliError> {
    tokenize_strict(source)
        .map(|tokens| tokens.len())
        .map_err(|error| CliError::from_lex(&error, name, source))
}

/// Checks every file and reports each outcome; returns how many failed.
fn check_files(files: &[PathBuf], force: bool) -> usize {
    let mut failures = 0;

    for path in files {
        let checked = ensure_stride_file(path, force)
            .and_then(|()| read_source(path))
            .map_err(|e| CliError::new(format!("{:#}", e)))
            .and_then(|(name, source)| check_source(&name, &source).map(|count| (name, count)));

        match checked {
            Ok((name, count)) => {
                println!(
                    "{} {} {}",
                    "✓".green().bold(),
                    name,
                    format!("({} tokens)", count).dimmed()
                );
            }
            Err(error) => {
                error.display();
                failures += 1;
            }
        }
    }

    failures
}

fn print_info() {
    println!("{} {}", "Language:".cyan().bold(), STRIDE.name);
    println!("{} {}", "Aliases:".cyan().bold(), STRIDE.aliases.join(", "));
    println!("{} {}", "Filenames:".cyan().bold(), STRIDE.filenames.join(", "));
    println!();

    println!("{} ({})", "Keywords:".cyan().bold(), KEYWORDS.len());
    for chunk in KEYWORDS.chunks(10) {
        println!("  {}", chunk.join(" "));
    }
    println!();

    println!("{}", "Token categories:".cyan().bold());
    for category in TokenCategory::ALL {
        println!("  {:<16} {}", category.name(), category.scope().dimmed());
    }
}
