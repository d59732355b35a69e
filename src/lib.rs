//! Kumo-Harvest: a crawl-session artifact archiver
//!
//! This crate drives a crawl session against a single seed URL and turns the
//! per-page results produced by a crawling engine into a durable, collision-free
//! artifact store on disk: Markdown, cleaned HTML, screenshots, PDFs, and a
//! bounded set of referenced images.

pub mod artifacts;
pub mod config;
pub mod engine;
pub mod filter;
pub mod images;
pub mod layout;
pub mod naming;
pub mod session;

use thiserror::Error;

/// Main error type for Kumo-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Engine error: {0}")]
    Engine(#[from] engine::EngineError),

    #[error("Error log failure: {0}")]
    ErrorLog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
///
/// `InvalidUrl` is the one fatal, user-facing validation failure in the core:
/// it means no session root directory can be derived from the seed, and the
/// session aborts before any directory or network I/O.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Invalid URL, cannot derive a directory name from: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Kumo-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlTarget, Settings};
pub use engine::{CrawlEngine, CrawlResult, EngineConfig, ImageRef};
pub use layout::SessionLayout;
pub use naming::{sanitize, sanitize_directory_name, ArtifactKind, FilenamePlan};
pub use session::SessionRunner;
