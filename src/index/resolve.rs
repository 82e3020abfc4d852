//! Identity resolution.
//!
//! Maps a raw reference to the canonical identity used for de-duplication:
//! the resolved document's vault path when the target exists, otherwise the
//! normalized raw string. Two spellings of the same logical link (alias,
//! case, relative vs absolute form) collapse onto one identity.

use crate::corpus::{link_path, Corpus};
use crate::utils::normalize_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub identity: String,
    pub resolved_path: Option<String>,
    pub display_text: String,
}

/// Resolve one raw reference originating from `origin_path`. `report_path`
/// is the destination the display text will be read from.
pub fn resolve_target(
    corpus: &dyn Corpus,
    raw_target: &str,
    origin_path: &str,
    report_path: &str,
    link_to_files: bool,
) -> ResolvedTarget {
    match corpus.resolve(raw_target, origin_path) {
        Some(doc) => {
            let display = corpus.display_form(doc, report_path, true);
            let display_text =
                if link_to_files { format!("[[{display}]]") } else { display };
            ResolvedTarget {
                identity: doc.path.clone(),
                resolved_path: Some(doc.path.clone()),
                display_text,
            }
        }
        None => {
            let identity = normalize_path(link_path(raw_target).trim());
            // A missing target is always rendered as a link so the broken
            // reference stays actionable in the report.
            let display_text = format!("[[{identity}]]");
            ResolvedTarget { identity, resolved_path: None, display_text }
        }
    }
}
