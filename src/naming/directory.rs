//! Session root directory derivation
//!
//! The session root is derived from the seed URL's host only; scheme and
//! path are ignored. This is the one place in the core where malformed user
//! input is fatal.

use crate::UrlError;

/// Derives a directory name from a URL's host/domain
///
/// After stripping the scheme, the longest run of `[a-zA-Z0-9.-]` characters
/// is taken as the host candidate; every character outside `[a-zA-Z0-9]` is
/// then replaced with an underscore. The candidate must contain at least one
/// dot, so bare words from junk input ("not a url") are rejected rather than
/// silently producing a directory.
///
/// # Arguments
///
/// * `url` - The seed URL to derive a directory name from
///
/// # Returns
///
/// * `Ok(String)` - Sanitized directory name, e.g. `sub_example_com`
/// * `Err(UrlError::InvalidUrl)` - No host-like run could be extracted
///
/// # Examples
///
/// ```
/// use kumo_harvest::naming::sanitize_directory_name;
///
/// let name = sanitize_directory_name("https://sub.example.com/path?x=1").unwrap();
/// assert_eq!(name, "sub_example_com");
///
/// assert!(sanitize_directory_name("not a url").is_err());
/// ```
pub fn sanitize_directory_name(url: &str) -> Result<String, UrlError> {
    // Everything after the scheme separator; inputs without one pass through
    let after_scheme = url.rsplit("//").next().unwrap_or(url);

    let host = longest_host_run(after_scheme)
        .ok_or_else(|| UrlError::InvalidUrl(url.to_string()))?;

    Ok(host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect())
}

/// Finds the longest run of host characters (`[a-zA-Z0-9.-]`) that contains
/// at least one dot; ties resolve to the earliest run
fn longest_host_run(input: &str) -> Option<&str> {
    let mut best: Option<&str> = None;
    let mut run_start: Option<usize> = None;

    for (idx, c) in input.char_indices() {
        let is_host_char = c.is_ascii_alphanumeric() || c == '.' || c == '-';
        match (is_host_char, run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                best = longer_of(best, &input[start..idx]);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        best = longer_of(best, &input[start..]);
    }

    best.filter(|run| run.contains('.'))
}

fn longer_of<'a>(current: Option<&'a str>, candidate: &'a str) -> Option<&'a str> {
    match current {
        Some(c) if c.len() >= candidate.len() => Some(c),
        _ => Some(candidate),
    }
}
