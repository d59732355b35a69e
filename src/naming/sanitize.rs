//! Filename sanitization with deterministic overflow handling
//!
//! Maps a (url, artifact kind) pair to a filesystem-legal filename plan.
//! The mapping is pure and total: it never fails, and the final name never
//! exceeds [`MAX_FILENAME_BYTES`].

/// Maximum length in bytes for filenames on common filesystems (NTFS, ext4)
pub const MAX_FILENAME_BYTES: usize = 255;

/// The kind of artifact a filename is being planned for
///
/// The kind determines the target subdirectory and the default extension
/// when the URL itself does not carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Markdown rendering of the page body
    Markdown,
    /// Cleaned HTML of the page
    Html,
    /// Page screenshot (PNG bytes from the engine)
    Screenshot,
    /// Page PDF render
    Pdf,
    /// Referenced image downloaded from the page
    Image,
}

impl ArtifactKind {
    /// Returns the default file extension for this kind, including the dot
    pub fn default_extension(&self) -> &'static str {
        match self {
            ArtifactKind::Markdown => ".md",
            ArtifactKind::Html => ".html",
            ArtifactKind::Screenshot => ".png",
            ArtifactKind::Pdf => ".pdf",
            ArtifactKind::Image => ".jpg",
        }
    }
}

/// A planned filename, split into base and extension
///
/// Invariant: `base.len() + extension.len() <= MAX_FILENAME_BYTES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePlan {
    /// Sanitized base name (no extension)
    pub base: String,
    /// Extension including the leading dot
    pub extension: String,
}

impl FilenamePlan {
    /// Returns the complete filename (base + extension)
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base, self.extension)
    }
}

/// Maps a URL and artifact kind to a filesystem-legal filename plan
///
/// The algorithm:
///
/// 1. Strip the scheme and replace path separators and the query delimiter
///    with underscores, along with any other filesystem-illegal character
///    (`< > : " / \ | ? *`). The illegal set covers Windows-style
///    filesystems too, so archives stay portable when moved cross-platform.
/// 2. If the base plus extension fits within [`MAX_FILENAME_BYTES`], use it
///    directly.
/// 3. Otherwise percent-decode the original URL and retry; decoding may
///    shorten multi-byte encoded sequences. Decode failures are swallowed.
/// 4. As a last resort, truncate the base and append the literal suffix
///    `_truncated` before the extension. Truncation is deterministic but
///    loses uniqueness for pathologically long near-duplicate URLs.
///
/// For [`ArtifactKind::Image`] the extension is taken from the URL's own
/// path when it carries one (e.g. `.png`); every other kind uses its fixed
/// extension so page bodies and renders stay grouped by type.
pub fn sanitize(url: &str, kind: ArtifactKind) -> FilenamePlan {
    let extension = extension_for(url, kind);

    let base = sanitize_base(url);
    if base.len() + extension.len() <= MAX_FILENAME_BYTES {
        return FilenamePlan { base, extension };
    }

    // Percent-decoding can shorten %-escaped multi-byte sequences enough to
    // fit. Decode failures fall through to truncation.
    if let Ok(decoded) = urlencoding::decode(url) {
        let decoded_base = sanitize_base(&decoded);
        if decoded_base.len() + extension.len() <= MAX_FILENAME_BYTES {
            return FilenamePlan {
                base: decoded_base,
                extension,
            };
        }
    }

    let suffix = "_truncated";
    let limit = MAX_FILENAME_BYTES - suffix.len() - extension.len();
    let truncated = truncate_at_char_boundary(&base, limit);
    FilenamePlan {
        base: format!("{}{}", truncated, suffix),
        extension,
    }
}

/// Sanitizes a URL into a base name: scheme stripped, separators and
/// filesystem-illegal characters replaced with underscores
fn sanitize_base(url: &str) -> String {
    let stripped = url.replace("https://", "").replace("http://", "");
    stripped
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

/// Derives the extension for a plan: the URL's own path extension for
/// images, the kind's fixed extension otherwise
fn extension_for(url: &str, kind: ArtifactKind) -> String {
    if kind == ArtifactKind::Image {
        if let Some(ext) = url_path_extension(url) {
            return ext;
        }
    }
    kind.default_extension().to_string()
}

/// Extracts a plausible file extension from the URL's path, if any
///
/// Query string and fragment are ignored. The extension must be 1-5 ASCII
/// alphanumeric characters; anything else (trailing dots, version-number
/// segments, empty stems) is rejected.
fn url_path_extension(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let last_segment = without_query.rsplit('/').next().unwrap_or("");

    let (stem, ext) = last_segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 5 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Truncates a string to at most `max_bytes`, backing up to a char boundary
/// so the result stays valid UTF-8
fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
