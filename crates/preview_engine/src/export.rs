use std::path::{Path, PathBuf};

use serde_json::json;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::types::{Contents, Files, RunSummary};

pub const MANIFEST_FILENAME: &str = "previews.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub doc_count: usize,
    pub skipped: Vec<String>,
    pub manifest_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("manifest serialization failed: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("document {0:?} would be overwritten by the preview manifest")]
    ManifestCollision(String),
}

/// Write every document body under `output_dir` plus a preview manifest.
///
/// Text bodies are written as UTF-8; documents without contents are listed in
/// `skipped`. A document stored at the manifest path is rejected before
/// anything is written.
pub fn write_output(
    output_dir: &Path,
    files: &Files,
    key: &str,
    summary: &RunSummary,
) -> Result<OutputSummary, ExportError> {
    if files.contains_key(MANIFEST_FILENAME) {
        return Err(ExportError::ManifestCollision(MANIFEST_FILENAME.to_string()));
    }

    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let mut doc_count = 0;
    let mut skipped = Vec::new();

    for (path, document) in files {
        let bytes: &[u8] = match &document.contents {
            Contents::Buffer(bytes) => &bytes[..],
            Contents::Text(text) => text.as_bytes(),
            Contents::Absent => {
                skipped.push(path.clone());
                continue;
            }
        };
        writer.write(path, bytes)?;
        doc_count += 1;
    }

    let previews = files
        .iter()
        .filter_map(|(path, document)| {
            document
                .metadata
                .get(key)
                .map(|preview| json!({ "path": path, "preview": preview }))
        })
        .collect::<Vec<_>>();
    let manifest = json!({
        "doc_count": doc_count,
        "key": key,
        "summary": summary,
        "previews": previews,
    });
    let manifest_path =
        writer.write(MANIFEST_FILENAME, serde_json::to_string_pretty(&manifest)?.as_bytes())?;

    Ok(OutputSummary {
        doc_count,
        skipped,
        manifest_path,
    })
}
