//! Filesystem vault implementation of [`Corpus`].
//!
//! Walks a root directory for markdown documents, extracts their outgoing
//! references once up front, and answers resolution queries from in-memory
//! indexes. Documents are enumerated in deterministic sorted order by
//! vault-relative path.

use crate::corpus::{extract, link_path, Corpus, DocumentInfo, OutgoingRefs};
use crate::utils::paths::{normalize_path, resolve_relative};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct FsVault {
    root: PathBuf,
    docs: Vec<DocumentInfo>,
    refs: HashMap<String, OutgoingRefs>,
    /// Lowercased vault-relative path -> index into `docs`.
    by_path: HashMap<String, usize>,
    /// Lowercased basename -> indexes into `docs`, in enumeration order.
    by_name: HashMap<String, Vec<usize>>,
    /// Lowercased stem (basename without `.md`) -> number of documents.
    stem_counts: HashMap<String, usize>,
}

impl FsVault {
    /// Scan `root` and build the corpus. Hidden directories (`.obsidian`,
    /// `.git`, ...) are skipped; files that are not valid UTF-8 are skipped
    /// with a warning.
    pub fn open(root: &Path) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("vault directory not found: {}", root.display()))?;

        let mut paths: Vec<(PathBuf, String)> = Vec::new();
        let walker = WalkBuilder::new(&root)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .hidden(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir {
                    if let Some(name) = entry.file_name().to_str() {
                        if name.starts_with('.') && entry.depth() > 0 {
                            return false;
                        }
                    }
                }
                true
            })
            .build();

        for entry in walker.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("md"))
                != Some(true)
            {
                continue;
            }
            let rel = match path.strip_prefix(&root) {
                Ok(p) => normalize_path(&p.to_string_lossy()),
                Err(_) => continue,
            };
            paths.push((path.to_path_buf(), rel));
        }

        // Sorted order makes enumeration, and therefore first-match
        // resolution and display-text freezing, deterministic.
        paths.sort_by(|a, b| a.1.cmp(&b.1));

        let mut docs = Vec::with_capacity(paths.len());
        let mut refs = HashMap::with_capacity(paths.len());
        for (abs, rel) in paths {
            let content = match std::fs::read_to_string(&abs) {
                Ok(c) => c,
                Err(err) => {
                    tracing::warn!("skipping unreadable document {}: {}", rel, err);
                    continue;
                }
            };
            refs.insert(rel.clone(), extract::extract_references(&content));
            docs.push(DocumentInfo::new(rel));
        }

        let mut by_path = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut stem_counts: HashMap<String, usize> = HashMap::new();
        for (idx, doc) in docs.iter().enumerate() {
            by_path.insert(doc.path.to_ascii_lowercase(), idx);
            by_name.entry(doc.basename.to_ascii_lowercase()).or_default().push(idx);
            let stem = doc.basename.strip_suffix(".md").unwrap_or(&doc.basename);
            *stem_counts.entry(stem.to_ascii_lowercase()).or_insert(0) += 1;
        }

        Ok(Self { root, docs, refs, by_path, by_name, stem_counts })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append `.md` when the last path segment carries no extension, the way
    /// a bare `[[Note]]` names `Note.md`.
    fn with_default_ext(target: &str) -> String {
        let last = target.rsplit('/').next().unwrap_or(target);
        if last.contains('.') {
            target.to_string()
        } else {
            format!("{target}.md")
        }
    }
}

impl Corpus for FsVault {
    fn documents(&self) -> &[DocumentInfo] {
        &self.docs
    }

    fn references(&self, doc: &DocumentInfo) -> OutgoingRefs {
        self.refs.get(&doc.path).cloned().unwrap_or_default()
    }

    fn resolve(&self, raw_target: &str, origin_path: &str) -> Option<&DocumentInfo> {
        let target = link_path(raw_target).trim();
        if target.is_empty() {
            return None;
        }
        let candidate = Self::with_default_ext(&normalize_path(target));

        // Vault-root-relative path match first.
        if let Some(&idx) = self.by_path.get(&candidate.to_ascii_lowercase()) {
            return Some(&self.docs[idx]);
        }

        // Then relative to the folder of the referencing document.
        let relative = resolve_relative(origin_path, &candidate);
        if let Some(&idx) = self.by_path.get(&relative.to_ascii_lowercase()) {
            return Some(&self.docs[idx]);
        }

        // Finally by bare filename; first document in enumeration order wins.
        let name = candidate.rsplit('/').next().unwrap_or(&candidate);
        self.by_name
            .get(&name.to_ascii_lowercase())
            .and_then(|idxs| idxs.first())
            .map(|&idx| &self.docs[idx])
    }

    fn display_form(
        &self,
        target: &DocumentInfo,
        _from_path: &str,
        prefer_shortest: bool,
    ) -> String {
        let stem = target.basename.strip_suffix(".md").unwrap_or(&target.basename);
        if prefer_shortest
            && self.stem_counts.get(&stem.to_ascii_lowercase()).copied().unwrap_or(0) == 1
        {
            return stem.to_string();
        }
        target.path.strip_suffix(".md").unwrap_or(&target.path).to_string()
    }
}
