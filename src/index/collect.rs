//! Link collection.
//!
//! Walks the corpus for one preset, skipping source-excluded documents, and
//! emits every outgoing reference in document-enumeration order with links
//! ahead of embeds within a document. That order is the tie-break for which
//! spelling of a link gets frozen into the report.

use crate::config::Preset;
use crate::corpus::{Corpus, Reference};
use crate::index::exclude::{is_excluded, ExclusionRules};

pub fn collect(corpus: &dyn Corpus, preset: &Preset, global_excludes: &[String]) -> Vec<Reference> {
    let source_rules =
        ExclusionRules::compile(&preset.exclude_from_filenames, &preset.exclude_from_globs);

    let mut references = Vec::new();
    for doc in corpus.documents() {
        if is_excluded(&doc.path, &doc.basename, &source_rules, global_excludes) {
            tracing::debug!("skipping excluded source {}", doc.path);
            continue;
        }
        let outgoing = corpus.references(doc);
        for raw in outgoing.links {
            references.push(Reference {
                origin_path: doc.path.clone(),
                raw_target: raw,
                is_embed: false,
            });
        }
        if preset.include_embeds {
            for raw in outgoing.embeds {
                references.push(Reference {
                    origin_path: doc.path.clone(),
                    raw_target: raw,
                    is_embed: true,
                });
            }
        }
    }
    references
}
