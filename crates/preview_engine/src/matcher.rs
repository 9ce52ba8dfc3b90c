use globset::{Glob, GlobBuilder, GlobMatcher};
use preview_logging::preview_warn;

/// Ordered glob list; a `!` prefix removes paths matched by earlier patterns.
///
/// Path segments starting with `.` only match a pattern segment that also
/// starts with `.`, so `**/*` leaves dotfiles out.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
struct Rule {
    negated: bool,
    matcher: GlobMatcher,
    dot_segments: Vec<GlobMatcher>,
}

impl Rule {
    fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
            && path
                .split('/')
                .filter(|segment| segment.starts_with('.'))
                .all(|segment| self.dot_segments.iter().any(|glob| glob.is_match(segment)))
    }
}

impl PathMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                let (negated, pattern) = match raw.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, raw),
                };
                match build_glob(pattern) {
                    Ok(glob) => Some(Rule {
                        negated,
                        matcher: glob.compile_matcher(),
                        dot_segments: pattern
                            .split('/')
                            .filter(|segment| segment.starts_with('.'))
                            .filter_map(|segment| build_glob(segment).ok())
                            .map(|glob| glob.compile_matcher())
                            .collect(),
                    }),
                    Err(err) => {
                        preview_warn!("ignoring invalid pattern {raw:?}: {err}");
                        None
                    }
                }
            })
            .collect();
        Self { rules }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.rules.iter().fold(false, |matched, rule| {
            if rule.negated {
                matched && !rule.matches(path)
            } else {
                matched || rule.matches(path)
            }
        })
    }

    /// Paths from `paths` that match, in their original order.
    pub fn filter<'a, I>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        paths
            .into_iter()
            .filter(|path| self.is_match(path))
            .cloned()
            .collect()
    }
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}
