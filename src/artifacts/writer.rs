//! Per-result artifact writes
//!
//! Each artifact kind present on a result and requested by the session is
//! written independently; a failure on one is recorded and the rest still
//! get their attempt.

use crate::artifacts::error_log::ErrorRecord;
use crate::config::ArtifactRequest;
use crate::engine::CrawlResult;
use crate::layout::SessionLayout;
use crate::naming::{sanitize, ArtifactKind};
use std::path::Path;

/// What happened while persisting one result's artifacts
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// Artifacts actually written to disk
    pub written: usize,
    /// Per-item failures, ready for the error log
    pub errors: Vec<ErrorRecord>,
}

/// The payload for one artifact write
enum Payload<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

/// Writes every requested, populated artifact kind of a result
///
/// An unsuccessful result short-circuits: no files are attempted for it.
/// Absent payloads (e.g. no screenshot because the engine cannot render)
/// are skipped silently; only actual write failures produce error records.
pub fn write_artifacts(
    result: &CrawlResult,
    layout: &SessionLayout,
    request: &ArtifactRequest,
) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();

    if !result.success {
        return outcome;
    }

    let attempts: [(ArtifactKind, bool, Option<Payload>); 4] = [
        (
            ArtifactKind::Markdown,
            request.markdown,
            result.markdown.as_deref().map(Payload::Text),
        ),
        (
            ArtifactKind::Html,
            request.html,
            result.cleaned_html.as_deref().map(Payload::Text),
        ),
        (
            ArtifactKind::Screenshot,
            request.screenshot,
            result.screenshot.as_deref().map(Payload::Binary),
        ),
        (
            ArtifactKind::Pdf,
            request.pdf,
            result.pdf.as_deref().map(Payload::Binary),
        ),
    ];

    for (kind, requested, payload) in attempts {
        let Some(payload) = payload else { continue };
        if !requested {
            continue;
        }

        let plan = sanitize(&result.url, kind);
        let file_name = plan.file_name();
        let path = layout.dir_for(kind).join(&file_name);

        match write_payload(&path, &payload) {
            Ok(()) => {
                tracing::debug!("Wrote {:?} artifact to {}", kind, path.display());
                outcome.written += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", path.display(), e);
                outcome.errors.push(ErrorRecord {
                    item: file_name,
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    outcome
}

fn write_payload(path: &Path, payload: &Payload) -> std::io::Result<()> {
    match payload {
        Payload::Text(text) => std::fs::write(path, text),
        Payload::Binary(bytes) => std::fs::write(path, bytes),
    }
}
