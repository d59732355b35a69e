//! Session directory layout
//!
//! Derives the per-session root directory from the seed URL's host and
//! creates the subdirectory tree each artifact kind writes into. Creation is
//! idempotent: re-running with the same seed reuses the same root.

use crate::naming::{sanitize_directory_name, ArtifactKind};
use crate::{HarvestError, UrlError};
use std::path::{Path, PathBuf};

/// The on-disk layout for one crawl session
///
/// Owned exclusively by the session. Concurrent sessions for the same seed
/// share a root and may race on writes; that is out of scope by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayout {
    /// Session root: `<results-root>/<sanitized-host>`
    pub root: PathBuf,
    /// Markdown page bodies
    pub md_dir: PathBuf,
    /// Cleaned HTML
    pub html_dir: PathBuf,
    /// Downloaded referenced images
    pub images_dir: PathBuf,
    /// Engine-accepted downloads
    pub downloads_dir: PathBuf,
}

impl SessionLayout {
    /// Derives the layout for a seed URL under the given results root
    ///
    /// This performs no I/O; it fails only when the seed URL yields no
    /// directory name, which aborts the session before anything touches
    /// disk or network.
    pub fn for_seed(results_root: &Path, seed_url: &str) -> Result<Self, UrlError> {
        let dir_name = sanitize_directory_name(seed_url)?;
        let root = results_root.join(dir_name);
        Ok(Self {
            md_dir: root.join("md"),
            html_dir: root.join("html"),
            images_dir: root.join("images"),
            downloads_dir: root.join("downloads"),
            root,
        })
    }

    /// Creates the root and every subdirectory, idempotently
    ///
    /// All subdirectories are created up front, independent of which
    /// artifact kinds the session actually requests, so later per-result
    /// branching never has layout side effects.
    pub fn ensure(&self) -> Result<(), HarvestError> {
        for dir in [
            &self.root,
            &self.md_dir,
            &self.html_dir,
            &self.images_dir,
            &self.downloads_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Returns the directory a given artifact kind is written into
    ///
    /// Screenshots and PDFs live directly in the session root; the rest
    /// have dedicated subdirectories.
    pub fn dir_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Markdown => &self.md_dir,
            ArtifactKind::Html => &self.html_dir,
            ArtifactKind::Image => &self.images_dir,
            ArtifactKind::Screenshot | ArtifactKind::Pdf => &self.root,
        }
    }
}
