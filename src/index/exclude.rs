//! Exclusion engine.
//!
//! A document is excluded when its path equals an entry of the global
//! exclusion set, its bare filename matches one of the configured regexes, or
//! its full path matches one of the configured globs. Invalid patterns are
//! skipped with a warning rather than aborting the run.

use crate::utils::path_equal;
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

/// Compiled form of one side's exclusion rules (source or target).
pub struct ExclusionRules {
    filename_regexes: Vec<Regex>,
    globs: GlobSet,
}

impl ExclusionRules {
    /// Compile filename regexes and path globs, skipping patterns that do
    /// not compile.
    pub fn compile(filename_patterns: &[String], glob_patterns: &[String]) -> Self {
        let mut filename_regexes = Vec::with_capacity(filename_patterns.len());
        for pattern in filename_patterns {
            match Regex::new(pattern) {
                Ok(regex) => filename_regexes.push(regex),
                Err(err) => {
                    tracing::warn!("skipping invalid filename pattern '{}': {}", pattern, err)
                }
            }
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in glob_patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(err) => tracing::warn!("skipping invalid glob '{}': {}", pattern, err),
            }
        }
        let globs = builder.build().unwrap_or_else(|err| {
            tracing::warn!("failed building glob set: {}", err);
            GlobSet::empty()
        });

        Self { filename_regexes, globs }
    }

    /// Regex rules run against the bare filename, glob rules against the
    /// full vault-relative path.
    pub fn matches(&self, path: &str, filename: &str) -> bool {
        self.filename_regexes.iter().any(|r| r.is_match(filename)) || self.globs.is_match(path)
    }
}

/// Full exclusion check including the always-on global set (every preset's
/// output path, so no report indexes any report).
pub fn is_excluded(
    path: &str,
    filename: &str,
    rules: &ExclusionRules,
    global_excludes: &[String],
) -> bool {
    global_excludes.iter().any(|g| path_equal(g, path)) || rules.matches(path, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(filenames: &[&str], globs: &[&str]) -> ExclusionRules {
        ExclusionRules::compile(
            &filenames.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &globs.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn filename_regex_applies_to_bare_filename_only() {
        let r = rules(&["^daily"], &[]);
        assert!(r.matches("notes/daily-2024.md", "daily-2024.md"));
        // The path prefix must not satisfy a filename anchor
        assert!(!r.matches("daily/note.md", "note.md"));
    }

    #[test]
    fn glob_applies_to_full_path() {
        let r = rules(&[], &["templates/**"]);
        assert!(r.matches("templates/weekly.md", "weekly.md"));
        assert!(!r.matches("notes/weekly.md", "weekly.md"));
    }

    #[test]
    fn global_excludes_use_normalized_path_equality() {
        let r = rules(&[], &[]);
        let globals = vec!["./used_links.md".to_string()];
        assert!(is_excluded("used_links.md", "used_links.md", &r, &globals));
        assert!(!is_excluded("notes/used_links.md", "used_links.md", &r, &globals));
    }

    #[test]
    fn invalid_patterns_are_skipped_not_fatal() {
        let r = rules(&["[unclosed"], &["bad[glob"]);
        // The invalid patterns exclude nothing; valid behavior continues.
        assert!(!r.matches("a.md", "a.md"));

        let mixed = rules(&["[unclosed", "^tmp"], &[]);
        assert!(mixed.matches("tmp-note.md", "tmp-note.md"));
    }

    #[test]
    fn empty_rules_exclude_nothing() {
        let r = rules(&[], &[]);
        assert!(!is_excluded("a.md", "a.md", &r, &[]));
    }
}
