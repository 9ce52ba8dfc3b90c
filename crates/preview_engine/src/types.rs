use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::DecodeError;

/// Document store: path -> document, iterated in sorted path order.
pub type Files = BTreeMap<String, Document>;

/// Body of a document as handed over by the pipeline.
///
/// Only `Buffer` bodies take part in preview generation; the other shapes are
/// skipped by the attachment gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Contents {
    Buffer(Bytes),
    Text(String),
    #[default]
    Absent,
}

impl Contents {
    pub fn as_buffer(&self) -> Option<&Bytes> {
        match self {
            Contents::Buffer(bytes) => Some(bytes),
            Contents::Text(_) | Contents::Absent => None,
        }
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Contents::Buffer(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub contents: Contents,
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            contents: Contents::Buffer(bytes.into()),
            metadata: Map::new(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: Contents::Text(text.into()),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// String value of a metadata field, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Raw body bytes; extractors cannot work on anything else.
    pub fn buffer(&self) -> Result<&Bytes, PreviewError> {
        match &self.contents {
            Contents::Buffer(bytes) => Ok(bytes),
            Contents::Text(_) => Err(PreviewError::MalformedDocument {
                reason: "contents is text, not a byte buffer".into(),
            }),
            Contents::Absent => Err(PreviewError::MalformedDocument {
                reason: "contents is missing".into(),
            }),
        }
    }
}

/// Output of every extractor. `preview` never carries the continue indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub preview: String,
    pub contents: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    SkippedExistingKey,
    SkippedNotBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub matched: usize,
    pub attached: usize,
    pub skipped_existing: usize,
    pub skipped_not_buffer: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: AttachOutcome) {
        match outcome {
            AttachOutcome::Attached => self.attached += 1,
            AttachOutcome::SkippedExistingKey => self.skipped_existing += 1,
            AttachOutcome::SkippedNotBuffer => self.skipped_not_buffer += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    Words,
    Characters,
}

impl std::fmt::Display for CountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountMode::Words => write!(f, "word"),
            CountMode::Characters => write!(f, "character"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("generating a {mode} count preview requires a positive integer, got {value}")]
    InvalidArgument { mode: CountMode, value: usize },
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("document not found: {0}")]
    DocumentNotFound(String),
}
