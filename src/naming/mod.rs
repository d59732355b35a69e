//! URL-to-filename mapping for Kumo-Harvest
//!
//! This module provides the deterministic, collision-resistant mapping from
//! arbitrary URLs to filesystem-legal names: per-artifact filename planning
//! with overflow handling, and session root directory derivation.

mod directory;
mod sanitize;

pub use directory::sanitize_directory_name;
pub use sanitize::{sanitize, ArtifactKind, FilenamePlan, MAX_FILENAME_BYTES};
