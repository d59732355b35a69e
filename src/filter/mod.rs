//! Excluded-domain list store
//!
//! The exclusion list is a user-editable file with one domain per line. It
//! is loaded once per session and handed to the engine as its blocklist.
//! A missing file is the expected first-run state: it is created empty and
//! an empty set is returned, never an error.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Loads the excluded-domain set from the given file
///
/// If the file does not exist it is created with empty content so the user
/// has something to edit before the next run. Present files are read as one
/// trimmed, non-empty line per domain; ordering carries no meaning, only
/// membership.
pub fn load_excluded_domains(path: &Path) -> io::Result<HashSet<String>> {
    if !path.exists() {
        tracing::info!("No exclusion list at {}, creating empty one", path.display());
        std::fs::write(path, "")?;
        return Ok(HashSet::new());
    }

    let content = std::fs::read_to_string(path)?;
    let domains: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    tracing::debug!("Loaded {} excluded domains from {}", domains.len(), path.display());
    Ok(domains)
}
