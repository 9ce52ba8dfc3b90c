use preview_logging::preview_debug;

use crate::config::PreviewConfig;
use crate::extract::{character_preview, marker_preview, word_preview};
use crate::strip::Strip;
use crate::types::{Document, Extraction, PreviewError};

/// Anything that turns a document into a preview and (possibly updated) contents.
pub trait Extractor {
    fn extract(&self, document: &Document) -> Result<Extraction, PreviewError>;
}

impl<F> Extractor for F
where
    F: Fn(&Document) -> Result<Extraction, PreviewError>,
{
    fn extract(&self, document: &Document) -> Result<Extraction, PreviewError> {
        self(document)
    }
}

/// Extraction mode picked once per configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewMode {
    Words(usize),
    /// Budget already has the continue indicator length taken off.
    Characters(usize),
    Marker { start: String, end: String },
    Empty,
}

impl PreviewMode {
    /// Words, then characters, then markers; first match wins.
    pub fn from_config(config: &PreviewConfig) -> Self {
        if config.words > 0 {
            PreviewMode::Words(config.words)
        } else if config.characters.count > 0 {
            let indicator = config.continue_indicator.chars().count();
            PreviewMode::Characters(config.characters.count.saturating_sub(indicator))
        } else if config.marker.is_active() {
            PreviewMode::Marker {
                start: config.marker.start.clone(),
                end: config.marker.end.clone(),
            }
        } else {
            PreviewMode::Empty
        }
    }
}

/// Selected mode bound to the strip rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewExtractor {
    mode: PreviewMode,
    strip: Strip,
}

impl PreviewExtractor {
    pub fn new(mode: PreviewMode, strip: Strip) -> Self {
        Self { mode, strip }
    }

    pub fn mode(&self) -> &PreviewMode {
        &self.mode
    }
}

impl Extractor for PreviewExtractor {
    fn extract(&self, document: &Document) -> Result<Extraction, PreviewError> {
        match &self.mode {
            PreviewMode::Words(count) => word_preview(*count, &self.strip, document),
            PreviewMode::Characters(count) => character_preview(*count, &self.strip, document),
            PreviewMode::Marker { start, end } => {
                marker_preview(start, end, &self.strip, document)
            }
            PreviewMode::Empty => Ok(Extraction {
                preview: String::new(),
                contents: document.buffer()?.clone(),
            }),
        }
    }
}

pub fn select_extractor(config: &PreviewConfig) -> PreviewExtractor {
    let mode = PreviewMode::from_config(config);
    preview_debug!("selected preview mode {mode:?}");
    PreviewExtractor::new(mode, config.strip.clone())
}

#[cfg(test)]
mod tests {
    use super::{select_extractor, PreviewMode};
    use crate::config::{CharacterLimit, Marker, PreviewConfig};

    fn base() -> PreviewConfig {
        PreviewConfig {
            marker: Marker::none(),
            ..PreviewConfig::default()
        }
    }

    #[test]
    fn nothing_enabled_selects_empty() {
        assert_eq!(select_extractor(&base()).mode(), &PreviewMode::Empty);
    }

    #[test]
    fn words_win_over_characters_and_markers() {
        let config = PreviewConfig {
            words: 5,
            characters: CharacterLimit::from(5),
            marker: Marker::new("{{ start }}", ""),
            ..base()
        };
        assert_eq!(select_extractor(&config).mode(), &PreviewMode::Words(5));

        let config = PreviewConfig { words: 0, ..config };
        assert_eq!(select_extractor(&config).mode(), &PreviewMode::Characters(2));

        let config = PreviewConfig {
            characters: CharacterLimit::default(),
            ..config
        };
        assert_eq!(
            select_extractor(&config).mode(),
            &PreviewMode::Marker {
                start: "{{ start }}".into(),
                end: String::new(),
            }
        );
    }

    #[test]
    fn character_budget_subtracts_indicator_characters() {
        let config = PreviewConfig {
            characters: CharacterLimit::from(10),
            continue_indicator: "…".into(),
            ..base()
        };
        assert_eq!(select_extractor(&config).mode(), &PreviewMode::Characters(9));
    }

    #[test]
    fn character_budget_saturates_at_zero() {
        let config = PreviewConfig {
            characters: CharacterLimit::from(2),
            ..base()
        };
        assert_eq!(select_extractor(&config).mode(), &PreviewMode::Characters(0));
    }

    #[test]
    fn default_config_uses_markers() {
        assert!(matches!(
            select_extractor(&PreviewConfig::default()).mode(),
            PreviewMode::Marker { .. }
        ));
    }
}
