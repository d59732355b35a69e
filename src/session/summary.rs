//! Session summary accounting

/// Aggregate outcome of one crawl session
///
/// The summary is always produced, even when every individual page or
/// image failed; a zero-result crawl is a valid, successful session.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    /// The seed URL the session ran against
    pub seed_url: String,

    /// Pages returned by the engine
    pub pages_total: usize,
    /// Pages fetched and processed successfully
    pub pages_succeeded: usize,
    /// Pages the engine reported as failed
    pub pages_failed: usize,

    /// Artifacts written to disk
    pub artifacts_written: usize,
    /// Artifact write failures (recorded in the error log)
    pub artifact_errors: usize,

    /// Images the engine discovered across all pages
    pub images_discovered: usize,
    /// Images downloaded this session
    pub images_downloaded: usize,
    /// Images skipped because their target already existed
    pub images_skipped: usize,
    /// Image retrieval failures (recorded in the error log)
    pub images_failed: usize,

    /// Successfully crawled URLs, in engine order
    pub urls: Vec<String>,
}

impl SessionSummary {
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            ..Default::default()
        }
    }

    /// Total error-log records produced by this session
    pub fn total_errors(&self) -> usize {
        self.artifact_errors + self.images_failed
    }
}

/// Prints the session summary to stdout
pub fn print_summary(summary: &SessionSummary) {
    println!("\n=== Crawl Session Summary ===");
    println!("Seed: {}", summary.seed_url);
    println!(
        "Pages: {} crawled ({} ok, {} failed)",
        summary.pages_total, summary.pages_succeeded, summary.pages_failed
    );
    println!(
        "Artifacts: {} written, {} errors",
        summary.artifacts_written, summary.artifact_errors
    );
    println!(
        "Images: {} discovered, {} downloaded, {} skipped, {} failed",
        summary.images_discovered,
        summary.images_downloaded,
        summary.images_skipped,
        summary.images_failed
    );
    if summary.total_errors() > 0 {
        println!(
            "⚠ {} errors were appended to the error log",
            summary.total_errors()
        );
    }
    println!("✓ Session complete");
}
