//! Bounded, deduplicated image retrieval
//!
//! Retrieves up to a fixed cap of the images discovered on a page. Targets
//! whose file already exists are skipped, so re-running a session never
//! re-downloads. Each image fails independently; the batch always runs to
//! the end of its cap.

use crate::artifacts::ErrorRecord;
use crate::engine::ImageRef;
use crate::naming::{sanitize, ArtifactKind};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-image failure reasons
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Source is not an absolute URL: {0}")]
    InvalidSource(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The outcome of one image attempt
#[derive(Debug)]
pub enum ImageOutcome {
    /// Bytes were retrieved and written
    Downloaded(PathBuf),
    /// The target path already existed; no retrieval was issued
    Skipped(PathBuf),
    /// The attempt failed; the record carries retry context
    Failed(ErrorRecord),
}

impl ImageOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ImageOutcome::Failed(_))
    }
}

/// Retrieves referenced images with a per-page cap and per-image timeout
pub struct ImageFetcher {
    client: Client,
    cap: usize,
}

impl ImageFetcher {
    /// Builds a fetcher whose client enforces the retrieval timeout
    pub fn new(user_agent: &str, cap: usize, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, cap })
    }

    /// Fetches up to `cap` images into `images_dir`, one at a time
    ///
    /// Only the first `cap` entries of the sequence are considered; engines
    /// routinely report far more images per page than are worth keeping.
    /// The directory is created if absent before the first write.
    pub async fn fetch_images(&self, images: &[ImageRef], images_dir: &Path) -> Vec<ImageOutcome> {
        let mut outcomes = Vec::new();
        if images.is_empty() {
            return outcomes;
        }

        if let Err(e) = std::fs::create_dir_all(images_dir) {
            tracing::warn!("Cannot create {}: {}", images_dir.display(), e);
            // Every attempt would fail the same way; report once per image
            for image in images.iter().take(self.cap) {
                let plan = sanitize(&image.src, ArtifactKind::Image);
                outcomes.push(ImageOutcome::Failed(ErrorRecord {
                    item: plan.file_name(),
                    path: images_dir.display().to_string(),
                    message: e.to_string(),
                }));
            }
            return outcomes;
        }

        for image in images.iter().take(self.cap) {
            outcomes.push(self.fetch_one(&image.src, images_dir).await);
        }
        outcomes
    }

    async fn fetch_one(&self, src: &str, images_dir: &Path) -> ImageOutcome {
        let plan = sanitize(src, ArtifactKind::Image);
        let file_name = plan.file_name();
        let target = images_dir.join(&file_name);

        if target.exists() {
            tracing::debug!("Skipping existing image {}", target.display());
            return ImageOutcome::Skipped(target);
        }

        match self.retrieve(src, &target).await {
            Ok(()) => {
                tracing::debug!("Downloaded {} to {}", src, target.display());
                ImageOutcome::Downloaded(target)
            }
            Err(e) => {
                tracing::warn!("Image {} failed: {}", src, e);
                ImageOutcome::Failed(ErrorRecord {
                    item: file_name,
                    path: target.display().to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    async fn retrieve(&self, src: &str, target: &Path) -> Result<(), ImageError> {
        // Sources must already be absolute; resolving relative paths against
        // some guessed base is worse than reporting them
        let url = Url::parse(src).map_err(|_| ImageError::InvalidSource(src.to_string()))?;
        if url.host_str().is_none() || !matches!(url.scheme(), "http" | "https") {
            return Err(ImageError::InvalidSource(src.to_string()));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        std::fs::write(target, &bytes)?;
        Ok(())
    }
}
