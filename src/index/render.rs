//! Report rendering.

use crate::index::aggregate::LinkIndex;

/// Render the aggregated index: `"<count> <link>"` per entry, sorted by
/// count descending. The sort is stable, so equal counts keep their
/// first-insertion order. Strict line breaks put a blank line between
/// entries.
pub fn render(index: &LinkIndex, strict_line_breaks: bool) -> String {
    let mut entries: Vec<_> = index.entries().iter().collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    let separator = if strict_line_breaks { "\n\n" } else { "\n" };
    entries
        .iter()
        .map(|e| format!("{} {}", e.count, e.link))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::corpus::fake::FakeCorpus;
    use crate::corpus::Reference;
    use crate::index::aggregate::aggregate;

    fn index_of(targets: &[&str]) -> LinkIndex {
        let corpus = FakeCorpus::new();
        let refs: Vec<Reference> = targets
            .iter()
            .map(|t| Reference {
                origin_path: "a.md".into(),
                raw_target: t.to_string(),
                is_embed: false,
            })
            .collect();
        aggregate(&corpus, &refs, &Preset::with_name("p"))
    }

    #[test]
    fn sorts_by_count_descending() {
        let index = index_of(&["Once", "Twice", "Twice", "Thrice", "Thrice", "Thrice"]);
        let out = render(&index, false);
        assert_eq!(out, "3 [[Thrice]]\n2 [[Twice]]\n1 [[Once]]");
    }

    #[test]
    fn equal_counts_keep_first_insertion_order() {
        let index = index_of(&["Zeta", "Alpha", "Mid"]);
        let out = render(&index, false);
        assert_eq!(out, "1 [[Zeta]]\n1 [[Alpha]]\n1 [[Mid]]");
    }

    #[test]
    fn strict_line_breaks_double_the_separator() {
        let index = index_of(&["A", "B"]);
        assert_eq!(render(&index, true), "1 [[A]]\n\n1 [[B]]");
    }

    #[test]
    fn empty_index_renders_empty_string() {
        let index = index_of(&[]);
        assert_eq!(render(&index, true), "");
    }
}
