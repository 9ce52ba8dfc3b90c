use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Markdown link brackets, reference ids, HTML tags and emphasis characters.
pub const DEFAULT_STRIP_PATTERN: &str = r"\[|\]\[.*?\]|<.*?>|[*_<>]";

static DEFAULT_STRIP: OnceLock<Regex> = OnceLock::new();

/// Rule removing text from a generated preview. Never applied to document contents.
#[derive(Debug, Clone)]
pub enum Strip {
    None,
    Literal(String),
    Pattern(Regex),
}

impl Strip {
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Strip::None
        } else {
            Strip::Literal(text)
        }
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Strip::Pattern)
    }

    /// The default rule stripping common markdown/HTML syntax.
    pub fn markup() -> Self {
        let re = DEFAULT_STRIP.get_or_init(|| {
            Regex::new(DEFAULT_STRIP_PATTERN).expect("default strip pattern is valid")
        });
        Strip::Pattern(re.clone())
    }

    /// Remove every occurrence of the rule from `text`.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Strip::None => Cow::Borrowed(text),
            Strip::Literal(needle) => {
                if text.contains(needle.as_str()) {
                    Cow::Owned(text.replace(needle.as_str(), ""))
                } else {
                    Cow::Borrowed(text)
                }
            }
            Strip::Pattern(re) => re.replace_all(text, ""),
        }
    }
}

impl Default for Strip {
    fn default() -> Self {
        Strip::markup()
    }
}

impl PartialEq for Strip {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Strip::None, Strip::None) => true,
            (Strip::Literal(a), Strip::Literal(b)) => a == b,
            (Strip::Pattern(a), Strip::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
