//! Count aggregation.
//!
//! Folds the reference stream into an insertion-ordered map from canonical
//! identity to occurrence count. The display text of an entry is frozen by
//! the first surviving occurrence; later occurrences only increment.

use crate::config::Preset;
use crate::corpus::{Corpus, Reference};
use crate::index::exclude::ExclusionRules;
use crate::index::resolve::resolve_target;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub identity: String,
    pub count: u64,
    pub link: String,
}

/// Identity -> entry mapping that remembers first-insertion order, which is
/// the rendering tie-break for equal counts.
#[derive(Debug, Default)]
pub struct LinkIndex {
    entries: Vec<IndexEntry>,
    by_identity: HashMap<String, usize>,
}

impl LinkIndex {
    /// Entries in first-insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    fn insert_or_increment(&mut self, identity: String, link: String) {
        match self.by_identity.get(&identity) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.by_identity.insert(identity.clone(), self.entries.len());
                self.entries.push(IndexEntry { identity, count: 1, link });
            }
        }
    }
}

/// Aggregate the collected references for one preset.
///
/// In nonexistent-only mode, references to existing documents are dropped
/// and target-side rules never fire (they only apply to resolved targets).
/// Otherwise resolved targets pass through target-side exclusion; unresolved
/// ones always survive.
pub fn aggregate(corpus: &dyn Corpus, references: &[Reference], preset: &Preset) -> LinkIndex {
    let target_rules =
        ExclusionRules::compile(&preset.exclude_to_filenames, &preset.exclude_to_globs);

    let mut index = LinkIndex::default();
    for reference in references {
        let resolved = resolve_target(
            corpus,
            &reference.raw_target,
            &reference.origin_path,
            &preset.output_path,
            preset.link_to_files,
        );

        if let Some(target_path) = &resolved.resolved_path {
            if preset.nonexistent_only {
                continue;
            }
            let filename = target_path.rsplit('/').next().unwrap_or(target_path);
            if target_rules.matches(target_path, filename) {
                continue;
            }
        }

        index.insert_or_increment(resolved.identity, resolved.display_text);
    }
    index
}
