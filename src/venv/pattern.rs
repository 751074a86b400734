//! Environment directory name patterns.
//!
//! A [`VenvPatterns`] value is the ordered set of name globs (`.venv`,
//! `venv`, ...) used both to recognise environment directories and to seed
//! the default-venv search. Matching is whole-name and case-sensitive, so
//! `venv` never matches `venv-backup`.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Result, WorkonError};

use super::validate::validate_patterns;

/// Patterns used when the user does not opt out of defaults.
pub const DEFAULT_VENV_PATTERNS: &[&str] = &[".venv", "venv"];

/// A single compiled pattern.
#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    matcher: GlobMatcher,
}

/// Ordered, non-empty set of environment name patterns.
#[derive(Debug, Clone)]
pub struct VenvPatterns {
    patterns: Vec<CompiledPattern>,
}

impl VenvPatterns {
    /// Compile a pattern set, keeping first-seen order and dropping duplicates.
    ///
    /// Fails with [`WorkonError::EmptyPatternSet`] when nothing is left.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sources: Vec<String> = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || sources.iter().any(|s| s == pattern) {
                continue;
            }
            sources.push(pattern.to_string());
        }

        validate_patterns(&sources)?;

        let patterns = sources
            .into_iter()
            .map(|source| {
                let glob = GlobBuilder::new(&source)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()
                    .map_err(|e| WorkonError::InvalidPattern {
                        pattern: source.clone(),
                        message: e.to_string(),
                    })?;
                Ok(CompiledPattern {
                    matcher: glob.compile_matcher(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Combine user patterns with the defaults.
    ///
    /// User patterns come first so they win ties in the default-venv search.
    pub fn with_defaults<S: AsRef<str>>(user: &[S], use_defaults: bool) -> Result<Self> {
        let defaults: &[&str] = if use_defaults {
            DEFAULT_VENV_PATTERNS
        } else {
            &[]
        };
        Self::new(
            user.iter()
                .map(|s| s.as_ref())
                .chain(defaults.iter().copied()),
        )
    }

    /// Whether `name` equals or glob-matches any pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matcher.is_match(name))
    }

    /// Whether the pattern at `index` matches `name`.
    pub fn matches_at(&self, index: usize, name: &str) -> bool {
        self.patterns
            .get(index)
            .is_some_and(|p| p.matcher.is_match(name))
    }

    /// Pattern sources in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    /// Whether the pattern at `index` contains glob metacharacters.
    pub fn is_glob(&self, index: usize) -> bool {
        self.patterns
            .get(index)
            .is_some_and(|p| p.source.contains(['*', '?', '[', '{']))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty. Construction guarantees it is not.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_match() {
        let patterns = VenvPatterns::new([".venv", "venv"]).unwrap();
        assert!(patterns.matches(".venv"));
        assert!(patterns.matches("venv"));
    }

    #[test]
    fn no_substring_matches() {
        let patterns = VenvPatterns::new(["venv"]).unwrap();
        assert!(!patterns.matches("venv-backup"));
        assert!(!patterns.matches("my-venv"));
        assert!(!patterns.matches(".venv"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let patterns = VenvPatterns::new([".venv"]).unwrap();
        assert!(!patterns.matches(".VENV"));
    }

    #[test]
    fn glob_patterns_match_whole_name() {
        let patterns = VenvPatterns::new(["venv-*"]).unwrap();
        assert!(patterns.matches("venv-3.12"));
        assert!(!patterns.matches("venv"));
        assert!(!patterns.matches("a/venv-3.12"));
    }

    #[test]
    fn duplicates_are_dropped_preserving_order() {
        let patterns = VenvPatterns::new(["env", ".venv", "env"]).unwrap();
        assert_eq!(patterns.iter().collect::<Vec<_>>(), vec!["env", ".venv"]);
    }

    #[test]
    fn matches_at_checks_one_pattern() {
        let patterns = VenvPatterns::new(["venv*", "venv"]).unwrap();
        assert!(patterns.matches_at(0, "venv2"));
        assert!(patterns.matches_at(1, "venv"));
        assert!(!patterns.matches_at(1, "venv2"));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = VenvPatterns::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, WorkonError::EmptyPatternSet));
    }

    #[test]
    fn blank_entries_do_not_count() {
        let err = VenvPatterns::new(["", "  "]).unwrap_err();
        assert!(matches!(err, WorkonError::EmptyPatternSet));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = VenvPatterns::new(["venv["]).unwrap_err();
        assert!(matches!(err, WorkonError::InvalidPattern { .. }));
    }

    #[test]
    fn with_defaults_puts_user_patterns_first() {
        let patterns = VenvPatterns::with_defaults(&["env"], true).unwrap();
        assert_eq!(
            patterns.iter().collect::<Vec<_>>(),
            vec!["env", ".venv", "venv"]
        );
    }

    #[test]
    fn with_defaults_disabled_and_no_user_patterns_fails() {
        let err = VenvPatterns::with_defaults::<&str>(&[], false).unwrap_err();
        assert!(matches!(err, WorkonError::EmptyPatternSet));
    }

    #[test]
    fn is_glob_detects_metacharacters() {
        let patterns = VenvPatterns::new([".venv", "venv-*"]).unwrap();
        assert!(!patterns.is_glob(0));
        assert!(patterns.is_glob(1));
        assert!(!patterns.is_glob(5));
    }
}
