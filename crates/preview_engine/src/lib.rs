//! Preview engine: excerpt extraction and attachment for build pipelines.
mod attach;
mod config;
mod decode;
mod export;
mod extract;
mod matcher;
mod persist;
mod plugin;
mod strategy;
mod strip;
mod types;

pub use attach::attach_preview;
pub use config::{
    CharacterLimit, Marker, PreviewConfig, DEFAULT_CONTINUE_INDICATOR, DEFAULT_KEY,
    DEFAULT_MARKER_END, DEFAULT_MARKER_START, DEFAULT_PATTERN,
};
pub use decode::{decode_document, decode_text, DecodeError, DecodedText};
pub use export::{write_output, ExportError, OutputSummary, MANIFEST_FILENAME};
pub use extract::{
    character_preview, character_preview_with, collapse_whitespace, marker_preview, word_preview,
};
pub use matcher::PathMatcher;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use plugin::{BuildContext, Done, Plugin, PreviewPlugin};
pub use strategy::{select_extractor, Extractor, PreviewExtractor, PreviewMode};
pub use strip::{Strip, DEFAULT_STRIP_PATTERN};
pub use types::{
    AttachOutcome, Contents, CountMode, Document, Extraction, Files, PreviewError, RunSummary,
};
