//! Configuration module for Kumo-Harvest
//!
//! Two kinds of configuration meet here: the per-session [`CrawlTarget`]
//! assembled from CLI arguments, and the optional TOML [`Settings`] file
//! for ambient knobs (results root, exclusion-list path, image retrieval
//! limits, user agent).

mod parser;
mod types;
mod validation;

pub use parser::load_settings;
pub use types::{ArtifactRequest, CrawlTarget, Settings};
pub use validation::{validate_settings, validate_target};
