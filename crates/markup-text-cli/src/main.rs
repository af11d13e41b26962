use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use markup_text_config::Config;
use markup_text_engine::{
    SanitizerConfig, is_json_string, is_probably_html, paragraph_contents, remove_html_tags,
    safe_html_span_with, sanitize_html_if_needed_with, sanitize_html_with,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Classify, sanitize and extract text from markup strings
#[derive(Parser)]
#[command(name = "markup-text", author, version, about)]
struct Cli {
    /// Config file (default: ~/.config/markup-text/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print `true` if the input looks like HTML, `false` otherwise
    Classify(Input),

    /// Remove unsafe elements and attributes
    Sanitize {
        /// Leave input that does not look like HTML untouched
        #[arg(long)]
        if_needed: bool,

        #[command(flatten)]
        input: Input,
    },

    /// Print the input as a tagged JSON value: sanitized markup or plain text
    Span(Input),

    /// Print the text content with every tag removed
    Strip(Input),

    /// Print paragraph texts as a JSON object keyed p1, p2, ... (or null)
    Paragraphs(Input),

    /// Print `true` if the input is a single JSON value, `false` otherwise
    IsJson(Input),
}

#[derive(Args)]
struct Input {
    /// Input file; reads stdin when omitted
    path: Option<PathBuf>,
}

impl Input {
    fn read(&self) -> Result<String> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display())),
            None => io::read_to_string(io::stdin()).context("Failed to read stdin"),
        }
    }
}

impl Command {
    fn input(&self) -> &Input {
        match self {
            Self::Classify(input)
            | Self::Sanitize { input, .. }
            | Self::Span(input)
            | Self::Strip(input)
            | Self::Paragraphs(input)
            | Self::IsJson(input) => input,
        }
    }

    fn needs_sanitizer(&self) -> bool {
        matches!(self, Self::Sanitize { .. } | Self::Span(_))
    }
}

fn main() -> Result<()> {
    log_builder(env_logger::Env::default()).init();

    let cli = Cli::parse();

    let config = if cli.command.needs_sanitizer() {
        load_sanitizer_config(cli.config.as_deref())?
    } else {
        SanitizerConfig::default()
    };

    let text = cli.command.input().read()?;
    let output = run(&cli.command, &text, &config)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

/// Info by default; `RUST_LOG` (or whatever `env` names) overrides it, both
/// globally and per module.
fn log_builder(env: env_logger::Env<'_>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info).parse_env(env);
    builder
}

/// Sanitizer settings from the config file. A missing default config file
/// means built-in defaults; a missing explicit one is an error.
fn load_sanitizer_config(explicit: Option<&Path>) -> Result<SanitizerConfig> {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)? {
        Some(config) => Ok(config.sanitizer_config()?),
        None if explicit.is_some() => {
            bail!("Config file {} does not exist", config_path.display())
        }
        None => Ok(SanitizerConfig::default()),
    }
}

fn run(command: &Command, text: &str, config: &SanitizerConfig) -> Result<String> {
    let output = match command {
        Command::Classify(_) => is_probably_html(text).to_string(),
        Command::Sanitize {
            if_needed: true, ..
        } => sanitize_html_if_needed_with(text, config).into_owned(),
        Command::Sanitize { .. } => sanitize_html_with(text, config),
        Command::Span(_) => serde_json::to_string_pretty(&safe_html_span_with(text, config))?,
        Command::Strip(_) => remove_html_tags(text),
        Command::Paragraphs(_) => serde_json::to_string_pretty(&paragraph_contents(text))?,
        Command::IsJson(_) => is_json_string(text).to_string(),
    };
    Ok(output)
}
