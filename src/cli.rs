//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// rosterboard - competition roster and selection charts
///
/// Reads a student list and a country flag map (local files or URLs) and
/// writes a static HTML page with the roster table and summary charts.
///
/// Examples:
///   rosterboard
///   rosterboard --students data/students.json --flags data/flag.json -o site/index.html
///   rosterboard --students https://example.org/students.json --timeout 10
///   rosterboard --format markdown -o summary.md
///   rosterboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Student list: a JSON file path or http(s) URL
    ///
    /// Defaults to students.json, or the value in .rosterboard.toml.
    #[arg(long, value_name = "SRC", env = "ROSTERBOARD_STUDENTS")]
    pub students: Option<String>,

    /// Flag map: a JSON file path or http(s) URL
    ///
    /// Defaults to flag.json, or the value in .rosterboard.toml.
    #[arg(long, value_name = "SRC", env = "ROSTERBOARD_FLAGS")]
    pub flags: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (html, json, markdown)
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Page title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .rosterboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds for URL sources
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Leave the charts out of the HTML page
    #[arg(long)]
    pub no_charts: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .rosterboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML page (default)
    #[default]
    Html,
    /// JSON tallies
    Json,
    /// Markdown summary
    Markdown,
}

impl OutputFormat {
    /// Output file used when neither the command line nor the config names one.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "roster.html",
            OutputFormat::Json => "roster.json",
            OutputFormat::Markdown => "roster.md",
        }
    }

    /// Whether the output embeds the rendered charts.
    pub fn uses_charts(&self) -> bool {
        matches!(self, OutputFormat::Html)
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        for (flag, value) in [("--students", &self.students), ("--flags", &self.flags)] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(format!("{} must not be empty", flag));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
