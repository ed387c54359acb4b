//! Fetching the student and flag documents.
//!
//! Each document comes from either an HTTP(S) URL or a local file. Both
//! are requested concurrently and the session is built once both arrive.

use crate::models::{FlagMap, StudentRecord};
use crate::session::Session;
use futures::future::try_join;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a source document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {document} document from {source_name}: {source}")]
    Parse {
        document: &'static str,
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a JSON document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options for loading a session.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Student list document.
    pub students: Source,
    /// Flag map document.
    pub flags: Source,
    /// Request timeout for URL sources (None for no timeout).
    pub timeout: Option<Duration>,
    /// Whether to show a spinner while loading.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            students: Source::Path(PathBuf::from("students.json")),
            flags: Source::Path(PathBuf::from("flag.json")),
            timeout: None,
            show_progress: true,
        }
    }
}

/// Load both documents concurrently and build the session.
pub async fn load_session(options: LoadOptions) -> Result<Session, LoadError> {
    info!(
        "Loading students from {} and flags from {}",
        options.students, options.flags
    );

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(LoadError::Client)?;

    let spinner = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Loading roster data...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = try_join(
        fetch_text(&client, &options.students),
        fetch_text(&client, &options.flags),
    )
    .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let (students_text, flags_text) = result?;

    let students = parse_students(&students_text, &options.students.to_string())?;
    let flags = parse_flags(&flags_text, &options.flags.to_string())?;

    info!(
        "Loaded {} students and {} flags",
        students.len(),
        flags.len()
    );

    Ok(Session::new(students, flags))
}

/// Read a document's body as text.
pub async fn fetch_text(client: &reqwest::Client, source: &Source) -> Result<String, LoadError> {
    match source {
        Source::Url(url) => {
            debug!("GET {}", url);
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|source| LoadError::Request {
                    url: url.clone(),
                    source,
                })?;

            if !response.status().is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: response.status(),
                });
            }

            response.text().await.map_err(|source| LoadError::Request {
                url: url.clone(),
                source,
            })
        }
        Source::Path(path) => {
            debug!("Reading {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
        }
    }
}

/// Parse the student list. The document must be a JSON array.
pub fn parse_students(text: &str, source_name: &str) -> Result<Vec<StudentRecord>, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        document: "student",
        source_name: source_name.to_string(),
        source,
    })
}

/// Parse the flag map. The document must be a JSON object.
pub fn parse_flags(text: &str, source_name: &str) -> Result<FlagMap, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        document: "flag",
        source_name: source_name.to_string(),
        source,
    })
}
