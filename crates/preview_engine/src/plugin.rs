use std::path::PathBuf;

use preview_logging::{preview_debug, preview_document, preview_info};
use serde_json::Value;

use crate::attach::attach_preview;
use crate::config::PreviewConfig;
use crate::matcher::PathMatcher;
use crate::strategy::select_extractor;
use crate::types::{Files, PreviewError, RunSummary};

/// Completion signal handed to a plugin; must be called exactly once.
pub type Done = Box<dyn FnOnce(Result<RunSummary, PreviewError>)>;

/// Where the surrounding build reads from and writes to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub source: PathBuf,
    pub destination: PathBuf,
}

pub trait Plugin {
    fn run(&self, files: &mut Files, context: &BuildContext, done: Done);
}

/// Attaches previews to every document matching the configured patterns.
#[derive(Debug, Clone)]
pub struct PreviewPlugin {
    config: PreviewConfig,
    matcher: PathMatcher,
}

impl PreviewPlugin {
    pub fn new(config: PreviewConfig) -> Self {
        let matcher = PathMatcher::new(config.pattern.as_slice());
        Self { config, matcher }
    }

    pub fn from_options(options: &Value) -> Self {
        Self::new(PreviewConfig::from_options(options))
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Process the matched documents in path order; stops at the first error.
    pub fn apply(&self, files: &mut Files) -> Result<RunSummary, PreviewError> {
        let matched = self.matcher.filter(files.keys());
        let mut summary = RunSummary {
            matched: matched.len(),
            ..RunSummary::default()
        };

        if matched.is_empty() {
            preview_debug!("no files matched the pattern {:?}", self.config.pattern);
            return Ok(summary);
        }

        let extractor = select_extractor(&self.config);
        for path in &matched {
            preview_document!(path, "attaching content preview");
            let outcome = attach_preview(&extractor, &self.config, files, path)?;
            summary.record(outcome);
        }

        preview_info!(
            "previews: {} matched, {} attached, {} kept existing, {} not a buffer",
            summary.matched,
            summary.attached,
            summary.skipped_existing,
            summary.skipped_not_buffer
        );
        Ok(summary)
    }
}

impl Plugin for PreviewPlugin {
    fn run(&self, files: &mut Files, _context: &BuildContext, done: Done) {
        done(self.apply(files));
    }
}
