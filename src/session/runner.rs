//! Session runner
//!
//! Drives one crawl session end to end. The engine call is the single long
//! suspension point; results are then drained sequentially, one result
//! fully persisted (all artifact kinds plus its capped images) before the
//! next, so outstanding file handles and connections stay bounded and the
//! error log keeps an auditable order.

use crate::artifacts::{write_artifacts, ErrorSink};
use crate::config::{validate_target, CrawlTarget, Settings};
use crate::engine::{CrawlEngine, EngineConfig, RenderOptions};
use crate::filter::load_excluded_domains;
use crate::images::{ImageFetcher, ImageOutcome};
use crate::layout::SessionLayout;
use crate::session::summary::SessionSummary;
use crate::{HarvestError, Result};
use std::collections::HashSet;
use std::time::Duration;

/// Orchestrates one crawl session against one seed URL
pub struct SessionRunner<E: CrawlEngine> {
    engine: E,
    settings: Settings,
    target: CrawlTarget,
}

impl<E: CrawlEngine> SessionRunner<E> {
    pub fn new(engine: E, settings: Settings, target: CrawlTarget) -> Self {
        Self {
            engine,
            settings,
            target,
        }
    }

    /// Runs the session and returns its summary
    ///
    /// The only fatal failures are a seed URL that yields no session root,
    /// an unbuildable layout, and engine-level refusal to start; everything
    /// past that point degrades to error-log records. Per-item records go
    /// to the injected `sink`.
    pub async fn run(&self, sink: &mut dyn ErrorSink) -> Result<SessionSummary> {
        validate_target(&self.target)?;

        // Init -> LayoutReady: fatal on failure, before any network I/O
        let layout = SessionLayout::for_seed(&self.settings.results_root, &self.target.seed_url)?;
        layout.ensure()?;
        tracing::info!("Session layout ready at {}", layout.root.display());

        // LayoutReady -> FilterLoaded: never fatal, worst case empty set
        let excluded = match load_excluded_domains(&self.settings.excluded_domains_path) {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(
                    "Could not load exclusion list from {}: {}; continuing with empty set",
                    self.settings.excluded_domains_path.display(),
                    e
                );
                HashSet::new()
            }
        };

        // FilterLoaded -> Crawling: the single long suspension point
        let engine_config = self.engine_config(excluded);
        tracing::info!(
            "Starting crawl of {} (deep: {}, depth: {})",
            self.target.seed_url,
            self.target.deep,
            self.target.depth
        );
        let results = self.engine.run(&engine_config).await?;
        tracing::info!("Crawled {} pages in total", results.len());

        // Crawling -> Draining: engine-defined order, one result at a time
        let request = self.target.artifact_request();
        let image_fetcher = ImageFetcher::new(
            &self.settings.user_agent,
            self.settings.image_cap,
            Duration::from_secs(self.settings.image_timeout_secs),
        )
        .map_err(|e| HarvestError::Engine(e.into()))?;

        let mut summary = SessionSummary::new(&self.target.seed_url);
        for result in &results {
            summary.pages_total += 1;

            if !result.success {
                tracing::warn!(
                    "Failed to crawl {}: {}",
                    result.url,
                    result.error_message.as_deref().unwrap_or("unknown error")
                );
                summary.pages_failed += 1;
                continue;
            }

            summary.pages_succeeded += 1;
            summary.urls.push(result.url.clone());
            summary.images_discovered += result.images.len();
            tracing::info!(
                "URL: {} ({} images found)",
                result.url,
                result.images.len()
            );

            let outcome = write_artifacts(result, &layout, &request);
            summary.artifacts_written += outcome.written;
            for record in &outcome.errors {
                summary.artifact_errors += 1;
                append_or_warn(sink, record);
            }

            let image_outcomes = image_fetcher
                .fetch_images(&result.images, &layout.images_dir)
                .await;
            for image_outcome in image_outcomes {
                match image_outcome {
                    ImageOutcome::Downloaded(_) => summary.images_downloaded += 1,
                    ImageOutcome::Skipped(_) => summary.images_skipped += 1,
                    ImageOutcome::Failed(record) => {
                        summary.images_failed += 1;
                        append_or_warn(sink, &record);
                    }
                }
            }
        }

        // Draining -> Done
        tracing::info!(
            "Session done: {} pages, {} artifacts, {} errors",
            summary.pages_total,
            summary.artifacts_written,
            summary.total_errors()
        );
        Ok(summary)
    }

    /// Assembles the closed engine option record for this session
    fn engine_config(&self, domain_blocklist: HashSet<String>) -> EngineConfig {
        EngineConfig {
            seed_url: self.target.seed_url.clone(),
            max_depth: self.target.deep.then_some(self.target.depth),
            include_external: false,
            domain_blocklist,
            exclude_social_links: true,
            check_robots: true,
            accept_downloads: self.target.accept_downloads,
            render: RenderOptions {
                pdf: self.target.save_pdf,
                screenshot: self.target.save_screenshot,
            },
        }
    }
}

/// Appends a record, degrading to a log line if the sink itself fails;
/// an unwritable error log must not end an otherwise healthy session
fn append_or_warn(sink: &mut dyn ErrorSink, record: &crate::artifacts::ErrorRecord) {
    if let Err(e) = sink.append(record) {
        tracing::error!("Could not append to error log: {} (record: {:?})", e, record);
    }
}
