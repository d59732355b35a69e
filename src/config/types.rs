use serde::Deserialize;
use std::path::PathBuf;

/// Ambient settings, optionally loaded from a TOML file
///
/// Every field has a sensible default so the tool runs with no settings
/// file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory all session directories are created under
    #[serde(rename = "results-root")]
    pub results_root: PathBuf,

    /// Path to the user-editable excluded-domains file
    #[serde(rename = "excluded-domains-path")]
    pub excluded_domains_path: PathBuf,

    /// Maximum number of images retrieved per page
    #[serde(rename = "image-cap")]
    pub image_cap: usize,

    /// Per-image retrieval timeout in seconds
    #[serde(rename = "image-timeout-secs")]
    pub image_timeout_secs: u64,

    /// User agent sent by the built-in HTTP engine and the image fetcher
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("./results"),
            excluded_domains_path: PathBuf::from("./excluded_domains.txt"),
            image_cap: 5,
            image_timeout_secs: 10,
            user_agent: format!("kumo-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Immutable description of one crawl session, built from user input
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    /// The single starting point for the session
    pub seed_url: String,

    /// Maximum traversal depth, meaningful only when `deep` is set
    pub depth: u32,

    /// Whether to follow discovered links (deep crawl) or fetch only the seed
    pub deep: bool,

    /// Whether the engine should accept file downloads
    pub accept_downloads: bool,

    /// Whether to persist a PDF render per page
    pub save_pdf: bool,

    /// Whether to persist a screenshot per page
    pub save_screenshot: bool,
}

/// The artifact kinds a session asked to persist
///
/// Markdown and cleaned HTML are always written when the engine produced
/// them; renders are opt-in per session.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactRequest {
    pub markdown: bool,
    pub html: bool,
    pub screenshot: bool,
    pub pdf: bool,
}

impl CrawlTarget {
    /// Derives the set of artifact kinds this session persists
    pub fn artifact_request(&self) -> ArtifactRequest {
        ArtifactRequest {
            markdown: true,
            html: true,
            screenshot: self.save_screenshot,
            pdf: self.save_pdf,
        }
    }
}
