//! The indexing pipeline: collect -> aggregate -> render -> write.
//!
//! Each run is a full recomputation over the current corpus snapshot; the
//! only side effect is the single report write at the end, so a failed run
//! leaves the destination in its last-known-good state.

use crate::config::Preset;
use crate::corpus::Corpus;
use crate::error::IndexerError;
use crate::report::{upsert, StorageAdapter};

pub mod aggregate;
pub mod collect;
pub mod exclude;
pub mod render;
pub mod resolve;

/// Run the full pipeline for one preset and return the rendered content.
pub fn generate_report(
    corpus: &dyn Corpus,
    storage: &mut dyn StorageAdapter,
    preset: &Preset,
    global_excludes: &[String],
) -> Result<String, IndexerError> {
    let references = collect::collect(corpus, preset, global_excludes);
    let index = aggregate::aggregate(corpus, &references, preset);
    let content = render::render(&index, preset.strict_line_breaks);

    tracing::info!(
        preset = %preset.name,
        references = references.len(),
        embeds = references.iter().filter(|r| r.is_embed).count(),
        targets = index.entries().len(),
        output = %preset.output_path,
        "writing link index"
    );
    upsert(storage, &preset.output_path, &content)?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fake::FakeCorpus;
    use crate::report::fake::MemStorage;

    /// The worked scenario: A links twice to B and once to a missing note,
    /// B embeds A, embeds enabled, default flags.
    fn example_corpus() -> FakeCorpus {
        FakeCorpus::new().doc("A.md", &["B", "B", "Missing"], &[]).doc("B.md", &[], &["A"])
    }

    #[test]
    fn renders_expected_report_for_example_corpus() {
        let corpus = example_corpus();
        let mut storage = MemStorage::default();
        let preset = {
            let mut p = Preset::with_name("p");
            p.output_path = "out.md".into();
            p
        };

        let content = generate_report(&corpus, &mut storage, &preset, &["out.md".to_string()])
            .expect("generate");
        assert_eq!(content, "2 [[B]]\n\n1 [[Missing]]\n\n1 [[A]]");
        assert_eq!(storage.files.get("out.md").map(String::as_str), Some(content.as_str()));
    }

    #[test]
    fn rerun_is_idempotent() {
        let corpus = example_corpus();
        let mut storage = MemStorage::default();
        let preset = {
            let mut p = Preset::with_name("p");
            p.output_path = "out.md".into();
            p
        };
        let globals = vec!["out.md".to_string()];

        let first = generate_report(&corpus, &mut storage, &preset, &globals).expect("run 1");
        let second = generate_report(&corpus, &mut storage, &preset, &globals).expect("run 2");
        assert_eq!(first, second);
    }

    #[test]
    fn source_exclusion_leaves_counts_toward_the_excluded_doc_intact() {
        // Excluding A as a source removes A's outgoing links but B's embed of
        // A still counts toward A.
        let corpus = example_corpus();
        let mut storage = MemStorage::default();
        let mut preset = Preset::with_name("p");
        preset.output_path = "out.md".into();
        preset.exclude_from_filenames = vec!["^A".into()];

        let content =
            generate_report(&corpus, &mut storage, &preset, &[]).expect("generate");
        assert_eq!(content, "1 [[A]]");
    }

    #[test]
    fn failed_write_propagates_without_touching_storage() {
        let corpus = example_corpus();
        let mut storage = MemStorage { fail_writes: true, ..Default::default() };
        let mut preset = Preset::with_name("p");
        preset.output_path = "out.md".into();

        let err = generate_report(&corpus, &mut storage, &preset, &[]).unwrap_err();
        assert!(matches!(err, IndexerError::Storage { .. }));
        assert!(storage.files.is_empty());
    }
}
