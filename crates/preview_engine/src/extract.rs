//! The three preview extractors: word count, character count and markers.
use preview_logging::preview_trace;

use crate::decode::{decode_document, decode_text};
use crate::strip::Strip;
use crate::types::{CountMode, Document, Extraction, PreviewError};

/// First `word_count` whitespace-delimited words, joined by single spaces.
///
/// Contents are returned untouched.
pub fn word_preview(
    word_count: usize,
    strip: &Strip,
    document: &Document,
) -> Result<Extraction, PreviewError> {
    if word_count == 0 {
        return Err(PreviewError::InvalidArgument {
            mode: CountMode::Words,
            value: word_count,
        });
    }

    let bytes = document.buffer()?;
    let text = decode_text(bytes)?;
    let joined = text
        .split_whitespace()
        .take(word_count)
        .collect::<Vec<_>>()
        .join(" ");
    let preview = strip.apply(&joined).into_owned();

    Ok(Extraction {
        preview,
        contents: bytes.clone(),
    })
}

/// First `char_count` characters, estimated through a word preview.
pub fn character_preview(
    char_count: usize,
    strip: &Strip,
    document: &Document,
) -> Result<Extraction, PreviewError> {
    character_preview_with(char_count, strip, document, word_preview)
}

/// Character preview with an explicit word extractor.
///
/// The word budget is `ceil(char_count / 2)`; a shorter result is kept as is.
pub fn character_preview_with<F>(
    char_count: usize,
    strip: &Strip,
    document: &Document,
    words: F,
) -> Result<Extraction, PreviewError>
where
    F: FnOnce(usize, &Strip, &Document) -> Result<Extraction, PreviewError>,
{
    if char_count == 0 {
        return Err(PreviewError::InvalidArgument {
            mode: CountMode::Characters,
            value: char_count,
        });
    }

    let word_estimate = char_count.div_ceil(2);
    let Extraction { preview, contents } = words(word_estimate, strip, document)?;
    let preview = match preview.char_indices().nth(char_count) {
        Some((end, _)) => preview[..end].to_string(),
        None => preview,
    };
    Ok(Extraction { preview, contents })
}

/// Preview delimited by `marker_start` and/or `marker_end`; markers are cut from contents.
///
/// An empty marker never matches. An end marker that starts before the start
/// marker ends does not bound the preview. Without markers the buffer is
/// returned as is; otherwise the contents keep the source encoding and BOM.
pub fn marker_preview(
    marker_start: &str,
    marker_end: &str,
    strip: &Strip,
    document: &Document,
) -> Result<Extraction, PreviewError> {
    let bytes = document.buffer()?;
    let decoded = decode_document(bytes)?;
    let text = decoded.text.as_str();

    let start = find_marker(text, marker_start);
    let end = find_marker(text, marker_end);

    let (span, contents) = match (start, end) {
        (Some(s), Some(e)) if e >= s + marker_start.len() => {
            let body = s + marker_start.len();
            let contents = [&text[..s], &text[body..e], &text[e + marker_end.len()..]].concat();
            (&text[body..e], contents)
        }
        (Some(s), _) => {
            let body = s + marker_start.len();
            let contents = [&text[..s], &text[body..]].concat();
            (&text[body..], contents)
        }
        (None, Some(e)) => {
            let contents = [&text[..e], &text[e + marker_end.len()..]].concat();
            (&text[..e], contents)
        }
        (None, None) => {
            preview_trace!("no preview markers found");
            return Ok(Extraction {
                preview: String::new(),
                contents: bytes.clone(),
            });
        }
    };

    let preview = collapse_whitespace(&strip.apply(span));
    Ok(Extraction {
        preview,
        contents: decoded.encode(&contents),
    })
}

fn find_marker(text: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        None
    } else {
        text.find(marker)
    }
}

/// Split on whitespace runs and rejoin with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
