use preview_logging::preview_document;
use serde_json::Value;

use crate::config::PreviewConfig;
use crate::strategy::Extractor;
use crate::types::{AttachOutcome, Contents, Files, PreviewError};

/// Generate a preview for `path` and attach it under `config.key`.
///
/// An existing preview is only replaced when `ignore_existing_key` is set, and
/// documents whose contents are not a byte buffer are left alone.
pub fn attach_preview(
    extractor: &dyn Extractor,
    config: &PreviewConfig,
    files: &mut Files,
    path: &str,
) -> Result<AttachOutcome, PreviewError> {
    let document = files
        .get_mut(path)
        .ok_or_else(|| PreviewError::DocumentNotFound(path.to_string()))?;

    if document.has_key(&config.key) && !config.ignore_existing_key {
        preview_document!(path, "keeping existing {:?}", config.key);
        return Ok(AttachOutcome::SkippedExistingKey);
    }
    if !document.contents.is_buffer() {
        preview_document!(path, "skipped, contents is not a buffer");
        return Ok(AttachOutcome::SkippedNotBuffer);
    }

    let extraction = extractor.extract(document)?;
    let preview = if config.effective_trim() {
        extraction.preview.trim()
    } else {
        extraction.preview.as_str()
    };
    let value = format!("{preview}{}", config.continue_indicator);

    document.metadata.insert(config.key.clone(), Value::String(value));
    document.contents = Contents::Buffer(extraction.contents);
    Ok(AttachOutcome::Attached)
}
