//! Typed preview configuration and its resolution from loosely typed options.
//!
//! Options arrive as JSON (from a build file or another plugin host). Every
//! option is resolved on its own: a value of the wrong shape falls back to the
//! documented default instead of failing the build.
use preview_logging::preview_debug;
use serde_json::{Map, Value};

use crate::strip::Strip;

pub const DEFAULT_PATTERN: &str = "**/*";
pub const DEFAULT_KEY: &str = "preview";
pub const DEFAULT_CONTINUE_INDICATOR: &str = "...";
pub const DEFAULT_MARKER_START: &str = "{{ previewStart }}";
pub const DEFAULT_MARKER_END: &str = "{{ previewEnd }}";

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub pattern: Vec<String>,
    pub key: String,
    pub ignore_existing_key: bool,
    pub continue_indicator: String,
    pub strip: Strip,
    pub trim: bool,
    pub words: usize,
    pub characters: CharacterLimit,
    pub marker: Marker,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            pattern: vec![DEFAULT_PATTERN.to_string()],
            key: DEFAULT_KEY.to_string(),
            ignore_existing_key: false,
            continue_indicator: DEFAULT_CONTINUE_INDICATOR.to_string(),
            strip: Strip::markup(),
            trim: false,
            words: 0,
            characters: CharacterLimit::default(),
            marker: Marker::default(),
        }
    }
}

/// Character budget; `trim` only applies while character mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterLimit {
    pub count: usize,
    pub trim: Option<bool>,
}

impl From<usize> for CharacterLimit {
    fn from(count: usize) -> Self {
        Self { count, trim: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub start: String,
    pub end: String,
}

impl Marker {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both markers empty: marker mode can never activate.
    pub fn none() -> Self {
        Self::new("", "")
    }

    pub fn is_active(&self) -> bool {
        !self.start.is_empty() || !self.end.is_empty()
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_START, DEFAULT_MARKER_END)
    }
}

impl PreviewConfig {
    /// Resolve loosely typed options into a configuration.
    pub fn from_options(options: &Value) -> Self {
        let mut config = Self::default();
        let Some(opts) = options.as_object() else {
            if !options.is_null() {
                preview_debug!("options are not an object, using defaults: {}", options);
            }
            return config;
        };

        if let Some(value) = opts.get("pattern") {
            match resolve_pattern(value) {
                Some(pattern) => config.pattern = pattern,
                None => fallback("pattern", value),
            }
        }
        if let Some(value) = opts.get("key") {
            match value.as_str() {
                Some(key) => config.key = key.to_string(),
                None => fallback("key", value),
            }
        }
        if let Some(value) = opts.get("ignoreExistingKey") {
            match value.as_bool() {
                Some(flag) => config.ignore_existing_key = flag,
                None => fallback("ignoreExistingKey", value),
            }
        }
        if let Some(value) = opts.get("continueIndicator") {
            match value.as_str() {
                Some(indicator) => config.continue_indicator = indicator.to_string(),
                None => fallback("continueIndicator", value),
            }
        }
        if let Some(value) = opts.get("strip") {
            match resolve_strip(value) {
                Some(strip) => config.strip = strip,
                None => fallback("strip", value),
            }
        }
        if let Some(value) = opts.get("trim") {
            match value.as_bool() {
                Some(flag) => config.trim = flag,
                None => fallback("trim", value),
            }
        }
        if let Some(value) = opts.get("words") {
            match resolve_count(value) {
                Some(words) => config.words = words,
                None => fallback("words", value),
            }
        }
        if let Some(value) = opts.get("characters") {
            config.characters = resolve_characters(value);
        }
        if let Some(value) = opts.get("marker") {
            config.marker = resolve_marker(value);
        }

        config
    }

    /// Trim flag in effect: the top-level one, or the character one in character mode.
    pub fn effective_trim(&self) -> bool {
        let character_mode = self.words == 0 && self.characters.count > 0;
        self.trim || (character_mode && self.characters.trim == Some(true))
    }
}

fn fallback(option: &str, value: &Value) {
    preview_debug!("option {option:?} has unusable value {value}, using default");
}

fn resolve_pattern(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(pattern) => Some(vec![pattern.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let pattern = item.as_str();
                    if pattern.is_none() {
                        fallback("pattern[]", item);
                    }
                    pattern.map(ToOwned::to_owned)
                })
                .collect(),
        ),
        _ => None,
    }
}

fn resolve_strip(value: &Value) -> Option<Strip> {
    match value {
        Value::String(literal) => Some(Strip::literal(literal.as_str())),
        Value::Object(map) => {
            let pattern = map.get("pattern")?.as_str()?;
            match Strip::pattern(pattern) {
                Ok(strip) => Some(strip),
                Err(err) => {
                    preview_debug!("invalid strip pattern {pattern:?}: {err}");
                    None
                }
            }
        }
        _ => None,
    }
}

/// Non-negative whole number, given as a JSON number or a numeric string.
fn resolve_count(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= usize::MAX as f64
    {
        Some(number as usize)
    } else {
        None
    }
}

fn resolve_characters(value: &Value) -> CharacterLimit {
    match value {
        Value::Object(map) => {
            let count = match map.get("count") {
                Some(count) => resolve_count(count).unwrap_or_else(|| {
                    fallback("characters.count", count);
                    0
                }),
                None => 0,
            };
            let trim = match map.get("trim") {
                Some(Value::Bool(flag)) => Some(*flag),
                Some(other) => {
                    fallback("characters.trim", other);
                    None
                }
                None => None,
            };
            CharacterLimit { count, trim }
        }
        other => match resolve_count(other) {
            Some(count) => CharacterLimit::from(count),
            None => {
                fallback("characters", other);
                CharacterLimit::default()
            }
        },
    }
}

fn resolve_marker(value: &Value) -> Marker {
    let empty = Map::new();
    let map = match value.as_object() {
        Some(map) => map,
        None => {
            fallback("marker", value);
            &empty
        }
    };
    let pick = |name: &str, default: &str| match map.get(name) {
        Some(Value::String(marker)) => marker.clone(),
        Some(other) => {
            fallback(name, other);
            default.to_string()
        }
        None => default.to_string(),
    };
    Marker {
        start: pick("start", DEFAULT_MARKER_START),
        end: pick("end", DEFAULT_MARKER_END),
    }
}
