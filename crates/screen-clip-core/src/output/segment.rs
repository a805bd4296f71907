use crate::MediaBlob;

use std::time::Duration;

use uuid::Uuid;

/// Name used when the operator leaves the prompt blank or cancels it.
pub const DEFAULT_FILE_STEM: &str = "capture";

/// Extension of every saved segment.
pub const FILE_EXTENSION: &str = "webm";

/// Turn the operator's answer into a file stem.
///
/// Blank or missing answers fall back to [`DEFAULT_FILE_STEM`]. Path
/// separators are replaced so the name cannot leave the output directory.
pub fn resolve_file_stem(answer: Option<&str>) -> String {
    let trimmed = answer.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return DEFAULT_FILE_STEM.to_string();
    }

    trimmed
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// A finished recording on its way to the save and preview collaborators.
#[derive(Debug, Clone)]
pub struct OutputSegment {
    /// Session that produced the media.
    pub session_id: Uuid,
    /// The encoded media.
    pub blob: MediaBlob,
    /// `<name>.webm`.
    pub file_name: String,
    /// Pause-aware recorded time.
    pub elapsed: Duration,
}

impl OutputSegment {
    /// Build a segment named after the operator's answer.
    pub fn new(session_id: Uuid, blob: MediaBlob, answer: Option<&str>, elapsed: Duration) -> Self {
        let file_name = format!("{}.{}", resolve_file_stem(answer), FILE_EXTENSION);

        Self {
            session_id,
            blob,
            file_name,
            elapsed,
        }
    }
}
