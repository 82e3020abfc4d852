//! Corpus abstraction
//!
//! The indexing pipeline never touches the filesystem directly; it talks to a
//! [`Corpus`] for document enumeration and link resolution, and to a
//! [`StorageAdapter`](crate::report::StorageAdapter) for the final write.
//! Tests exercise the pipeline against in-memory fakes.

pub mod extract;
pub mod vault;

pub use vault::FsVault;

/// One document in the corpus. `path` is vault-relative with forward
/// slashes; `basename` is the bare filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub path: String,
    pub basename: String,
}

impl DocumentInfo {
    pub fn new(path: impl Into<String>) -> Self {
        let path = crate::utils::normalize_path(&path.into());
        let basename = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self { path, basename }
    }
}

/// A single outgoing link or embed, in raw (unresolved) textual form.
#[derive(Debug, Clone)]
pub struct Reference {
    pub origin_path: String,
    pub raw_target: String,
    pub is_embed: bool,
}

/// Raw outgoing references of one document, in source order.
#[derive(Debug, Clone, Default)]
pub struct OutgoingRefs {
    pub links: Vec<String>,
    pub embeds: Vec<String>,
}

/// Read-only view of a document corpus.
pub trait Corpus {
    /// Ordered document descriptors. Enumeration order is the tie-break for
    /// which spelling of a link gets frozen into the report, so it must be
    /// deterministic.
    fn documents(&self) -> &[DocumentInfo];

    /// Raw outgoing references of `doc`.
    fn references(&self, doc: &DocumentInfo) -> OutgoingRefs;

    /// Resolve a raw reference, using `origin_path` to disambiguate relative
    /// forms. `None` means the target does not exist in the corpus.
    fn resolve(&self, raw_target: &str, origin_path: &str) -> Option<&DocumentInfo>;

    /// Textual form of `target` as it would be linked from `from_path`.
    /// With `prefer_shortest`, returns the bare name when unambiguous.
    fn display_form(&self, target: &DocumentInfo, from_path: &str, prefer_shortest: bool)
        -> String;
}

/// Strip the section anchor from a raw reference, keeping only the path part.
/// `"Note#Heading"` becomes `"Note"`. Aliases are already stripped at
/// extraction time.
pub fn link_path(raw_target: &str) -> &str {
    match raw_target.find('#') {
        Some(idx) => &raw_target[..idx],
        None => raw_target,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_path_strips_anchor() {
        assert_eq!(link_path("Note#Heading"), "Note");
        assert_eq!(link_path("Note"), "Note");
        assert_eq!(link_path("#Heading"), "");
    }

    #[test]
    fn document_info_normalizes_path() {
        let doc = DocumentInfo::new("./notes\\a.md");
        assert_eq!(doc.path, "notes/a.md");
        assert_eq!(doc.basename, "a.md");
    }
}
