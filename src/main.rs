//! rosterboard - competition roster and selection charts
//!
//! A CLI tool that loads a student list and a country flag map, tallies
//! selections per category and participation per country, and writes a
//! static HTML page with the roster table and summary charts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (load failure, bad config, unwritable output, etc.)

mod analysis;
mod chart;
mod cli;
mod config;
mod loader;
mod models;
mod report;
mod session;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use loader::{LoadOptions, Source};
use models::{Category, ReportMetadata, RosterReport};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // The config is read before logging starts so `[general] verbose` applies.
    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, config.general.verbose);

    info!("rosterboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    origin.log();

    if let Err(e) = run(args, config).await {
        error!("Render failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .rosterboard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change sources, title, and chart colors.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config_verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level(config_verbose))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, aggregate, render, and write the report.
async fn run(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    let options = LoadOptions {
        students: config.sources.students.parse::<Source>()?,
        flags: config.sources.flags.parse::<Source>()?,
        timeout: config.sources.timeout_seconds.map(Duration::from_secs),
        show_progress: !args.quiet,
    };
    let metadata_sources = (options.students.to_string(), options.flags.to_string());

    let mut session = loader::load_session(options)
        .await
        .context("Failed to load roster data")?;

    let tallies = analysis::aggregate(&session.students);

    if args.format.uses_charts() && config.report.include_charts {
        session.render_charts(&tallies, &config.report);
    }

    let metadata = ReportMetadata {
        title: config.report.title.clone(),
        students_source: metadata_sources.0,
        flags_source: metadata_sources.1,
        generated_at: Utc::now(),
        student_count: session.students.len(),
        flag_count: session.flags.len(),
    };

    let output = match args.format {
        OutputFormat::Html => report::render_page(&session, &metadata),
        OutputFormat::Json => report::generate_json_report(&RosterReport {
            metadata,
            tallies: tallies.clone(),
        })?,
        OutputFormat::Markdown => report::generate_markdown_report(&RosterReport {
            metadata,
            tallies: tallies.clone(),
        }),
    };

    let output_path = config.output_path(args.format);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("\n📊 Roster Summary:");
        println!("   Participants: {}", tallies.total);
        for category in Category::ALL {
            let tally = tallies.for_category(category);
            println!(
                "   - {}: {} selected, {} not selected",
                category, tally.selected, tally.not_selected
            );
        }
        println!("   Countries: {}", tallies.countries.len());
        println!("   Duration: {:.2}s", start_time.elapsed().as_secs_f64());
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Where the configuration came from, reported once logging is up.
enum ConfigOrigin {
    File(PathBuf),
    DefaultFile,
    BuiltIn,
    Unreadable(String),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded config from: {}", path.display()),
            ConfigOrigin::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigOrigin::BuiltIn => debug!("No config file found, using defaults"),
            ConfigOrigin::Unreadable(e) => warn!("Failed to load config: {}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::File(config_path.clone())));
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigOrigin::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigOrigin::BuiltIn)),
        Err(e) => Ok((Config::default(), ConfigOrigin::Unreadable(format!("{:#}", e)))),
    }
}
