//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.rosterboard.toml` files.

use crate::chart::{DEFAULT_COUNTRY_COLORS, DEFAULT_SELECTION_COLORS};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".rosterboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Source document settings.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path. When unset, the name follows the output format.
    #[serde(default)]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where the two JSON documents come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Student list: a path or an http(s) URL.
    #[serde(default = "default_students")]
    pub students: String,

    /// Flag map: a path or an http(s) URL.
    #[serde(default = "default_flags")]
    pub flags: String,

    /// Request timeout in seconds for URL sources.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            students: default_students(),
            flags: default_flags(),
            timeout_seconds: None,
        }
    }
}

fn default_students() -> String {
    "students.json".to_string()
}

fn default_flags() -> String {
    "flag.json".to_string()
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Colors for the Selected / Not Selected slices.
    #[serde(default = "default_selection_colors")]
    pub selection_colors: Vec<String>,

    /// Colors cycled across country slices.
    #[serde(default = "default_country_colors")]
    pub country_colors: Vec<String>,

    /// Render the charts below the table.
    #[serde(default = "default_true")]
    pub include_charts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            selection_colors: default_selection_colors(),
            country_colors: default_country_colors(),
            include_charts: true,
        }
    }
}

fn default_title() -> String {
    "Competition Roster".to_string()
}

fn default_selection_colors() -> Vec<String> {
    DEFAULT_SELECTION_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_country_colors() -> Vec<String> {
    DEFAULT_COUNTRY_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref students) = args.students {
            self.sources.students = students.clone();
        }
        if let Some(ref flags) = args.flags {
            self.sources.flags = flags.clone();
        }
        if let Some(timeout) = args.timeout {
            self.sources.timeout_seconds = Some(timeout);
        }

        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }
        if let Some(ref title) = args.title {
            self.report.title = title.clone();
        }
        if args.no_charts {
            self.report.include_charts = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Where the report for `format` is written.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        match self.general.output {
            Some(ref output) => PathBuf::from(output),
            None => PathBuf::from(format.default_file_name()),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    fn bare_args() -> Args {
        Args {
            students: None,
            flags: None,
            output: None,
            format: OutputFormat::Html,
            title: None,
            config: None,
            timeout: None,
            no_charts: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_output_path_defaults_by_format() {
        let mut config = Config::default();
        config.merge_with_args(&bare_args());

        assert_eq!(config.output_path(OutputFormat::Html), PathBuf::from("roster.html"));
        assert_eq!(config.output_path(OutputFormat::Json), PathBuf::from("roster.json"));
        assert_eq!(
            config.output_path(OutputFormat::Markdown),
            PathBuf::from("roster.md")
        );
    }

    #[test]
    fn test_output_path_explicit_wins() {
        let mut config: Config = toml::from_str("[general]\noutput = \"site/report.txt\"\n").unwrap();
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("site/report.txt")
        );

        let mut args = bare_args();
        args.output = Some(PathBuf::from("cli.json"));
        config.merge_with_args(&args);
        assert_eq!(config.output_path(OutputFormat::Json), PathBuf::from("cli.json"));
    }

    #[test]
    fn test_config_verbose_enables_debug_logging() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = bare_args();
        config.merge_with_args(&args);

        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, None);
        assert!(!config.general.verbose);
        assert_eq!(config.sources.students, "students.json");
        assert_eq!(config.sources.flags, "flag.json");
        assert_eq!(config.report.selection_colors, vec!["#4CAF50", "#FF5252"]);
        assert_eq!(config.report.country_colors.len(), 4);
        assert!(config.report.include_charts);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r##"
[general]
output = "site/index.html"
verbose = true

[sources]
students = "https://example.org/students.json"
timeout_seconds = 10

[report]
title = "Physics Olympiad"
country_colors = ["#000000"]
"##;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("site/index.html"));
        assert!(config.general.verbose);
        assert_eq!(config.sources.students, "https://example.org/students.json");
        assert_eq!(config.sources.flags, "flag.json");
        assert_eq!(config.sources.timeout_seconds, Some(10));
        assert_eq!(config.report.title, "Physics Olympiad");
        assert_eq!(config.report.country_colors, vec!["#000000"]);
        assert_eq!(config.report.selection_colors.len(), 2);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[sources]"));
        assert!(toml_str.contains("[report]"));
    }

    #[test]
    fn test_merge_only_explicit_args() {
        let mut config = Config::default();
        config.report.title = "From File".to_string();

        let args = Args {
            students: Some("remote.json".to_string()),
            flags: None,
            output: Some(PathBuf::from("out.html")),
            format: OutputFormat::Html,
            title: None,
            config: None,
            timeout: Some(5),
            no_charts: true,
            verbose: false,
            quiet: false,
            init_config: false,
        };
        config.merge_with_args(&args);

        assert_eq!(config.sources.students, "remote.json");
        assert_eq!(config.sources.flags, "flag.json");
        assert_eq!(config.sources.timeout_seconds, Some(5));
        assert_eq!(config.general.output.as_deref(), Some("out.html"));
        assert_eq!(config.report.title, "From File");
        assert!(!config.report.include_charts);
    }
}
