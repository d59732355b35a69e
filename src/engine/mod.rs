//! Crawling engine boundary
//!
//! The persistence core treats the engine as a black box behind the
//! [`CrawlEngine`] trait: it accepts a validated [`EngineConfig`] and
//! returns per-page [`CrawlResult`]s in engine-defined order. The built-in
//! [`HttpEngine`] is a plain HTTP implementation of that contract; sessions
//! under test substitute their own.

mod http;
mod parser;
mod robots;

pub use http::HttpEngine;
pub use parser::{parse_page, ExtractedPage};
pub use robots::RobotsGate;

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from the crawling engine itself
///
/// These are engine-fatal; per-page failures are reported inside
/// [`CrawlResult`] instead, so one bad page never ends the run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Render options forwarded to the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Produce a PDF render per page
    pub pdf: bool,
    /// Produce a screenshot per page
    pub screenshot: bool,
}

/// The closed, validated set of options an engine run accepts
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The single starting point for the crawl
    pub seed_url: String,

    /// Traversal depth; `None` means fetch the seed page only
    pub max_depth: Option<u32>,

    /// Whether discovered links outside the seed domain are followed
    pub include_external: bool,

    /// Domains the engine must refuse to traverse into
    pub domain_blocklist: HashSet<String>,

    /// Whether links into well-known social platforms are dropped
    pub exclude_social_links: bool,

    /// Whether the engine consults robots.txt before fetching
    pub check_robots: bool,

    /// Whether the engine accepts file downloads
    pub accept_downloads: bool,

    /// Render flags (PDF, screenshot)
    pub render: RenderOptions,
}

/// A referenced image discovered on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Image source URL as reported by the engine
    pub src: String,
}

/// One page's outcome, produced by the engine and read-only downstream
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    /// The page URL
    pub url: String,

    /// Whether the page was fetched and processed
    pub success: bool,

    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,

    /// Failure description for unsuccessful pages
    pub error_message: Option<String>,

    /// Markdown rendering of the page body
    pub markdown: Option<String>,

    /// Cleaned HTML of the page
    pub cleaned_html: Option<String>,

    /// Screenshot bytes, when the engine can render and it was requested
    pub screenshot: Option<Vec<u8>>,

    /// PDF bytes, when the engine can render and it was requested
    pub pdf: Option<Vec<u8>>,

    /// Images discovered on the page, in document order
    pub images: Vec<ImageRef>,
}

impl CrawlResult {
    /// Builds a failure result for a page that could not be fetched
    pub fn failure(url: &str, status_code: Option<u16>, message: String) -> Self {
        Self {
            url: url.to_string(),
            success: false,
            status_code,
            error_message: Some(message),
            ..Default::default()
        }
    }
}

/// The external crawling engine contract
///
/// One call covers the whole session: the engine performs the traversal and
/// returns every page result in the order it produced them. The caller does
/// not re-sort.
#[async_trait]
pub trait CrawlEngine: Send + Sync {
    /// Runs a crawl and returns all per-page results
    async fn run(&self, config: &EngineConfig) -> Result<Vec<CrawlResult>, EngineError>;
}
