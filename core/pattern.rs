use crate::CoreError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// One file-name pattern: a comma-separated list of shell-style glob
/// alternatives, optionally prefixed with `!` to negate the whole match.
/// Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    negated: bool,
    globs: GlobSet,
}

impl NamePattern {
    pub fn parse(pattern: &str) -> Result<Self, CoreError> {
        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let mut builder = GlobSetBuilder::new();
        for alternative in body.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let glob = GlobBuilder::new(alternative)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
                .map_err(|e| CoreError::Pattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| CoreError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(NamePattern {
            raw: pattern.to_string(),
            negated,
            globs,
        })
    }

    /// For `!` patterns, "no alternative matched" is itself a positive result.
    pub fn matches(&self, name: &str) -> bool {
        self.globs.is_match(name) != self.negated
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Ordered set of name patterns with "matches any" semantics.
///
/// Two of these drive a scan: the accept set (what counts as a scannable
/// file) and the ignore set (what is excluded regardless of accept match).
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<NamePattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for pattern in patterns {
            set.push(NamePattern::parse(pattern.as_ref())?);
        }
        Ok(set)
    }

    pub fn push(&mut self, pattern: NamePattern) {
        self.patterns.push(pattern);
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
