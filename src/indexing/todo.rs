//! TODO marker scanning
//!
//!     Comment text is searched for every configured marker pattern. Each pattern counts
//!     its non-overlapping matches; patterns without a match are left out of the result.
//!     Word scanning runs independently over the same text, so a `TODO` marker is also
//!     indexed as a word.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// One marker pattern, identified by `id` in the TODO index
#[derive(Debug, Clone)]
pub struct TodoPattern {
    id: String,
    regex: Regex,
}

impl TodoPattern {
    /// A case-insensitive literal marker; the literal doubles as the pattern id
    ///
    /// Fails only when the escaped marker exceeds the regex size limit.
    pub fn literal(marker: &str) -> Result<Self, regex::Error> {
        Self::regex(marker, &regex::escape(marker), false)
    }

    /// A regex marker
    pub fn regex(
        id: impl Into<String>,
        pattern: &str,
        case_sensitive: bool,
    ) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self {
            id: id.into(),
            regex,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of non-overlapping matches in `text`, saturating at `u32::MAX`
    pub fn count(&self, text: &str) -> u32 {
        saturate(self.regex.find_iter(text).count())
    }
}

fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

static DEFAULT_PATTERNS: Lazy<Vec<TodoPattern>> = Lazy::new(|| {
    vec![
        TodoPattern::regex("TODO", r"\btodo\b", false).expect("invalid regex"),
        TodoPattern::regex("FIXME", r"\bfixme\b", false).expect("invalid regex"),
    ]
});

/// Counts marker occurrences in comment text
#[derive(Debug, Clone)]
pub struct TodoScanner {
    patterns: Vec<TodoPattern>,
}

impl TodoScanner {
    pub fn new(patterns: Vec<TodoPattern>) -> Self {
        Self { patterns }
    }

    pub fn scan(&self, text: &str) -> Vec<(&str, u32)> {
        scan(text, &self.patterns)
    }
}

impl Default for TodoScanner {
    /// `TODO` and `FIXME` as whole words, case-insensitive
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.clone())
    }
}

/// Count matches of every marker in `text`, omitting markers that never matched
pub fn scan<'p>(text: &str, markers: &'p [TodoPattern]) -> Vec<(&'p str, u32)> {
    markers
        .iter()
        .filter_map(|marker| match marker.count(text) {
            0 => None,
            count => Some((marker.id(), count)),
        })
        .collect()
}
