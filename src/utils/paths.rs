//! Path normalization
//!
//! All vault paths are compared in a normalized form: forward slashes, no
//! leading `./`, no internal `/./` segments. This keeps a report path spelled
//! `./used_links.md` equal to `used_links.md` so self-exclusion cannot be
//! defeated by spelling.

/// Normalize a vault-relative path string.
pub fn normalize_path(path: &str) -> String {
    let mut s = path.replace('\\', "/");
    while let Some(stripped) = s.strip_prefix("./") {
        s = stripped.to_string();
    }
    while s.contains("/./") {
        s = s.replace("/./", "/");
    }
    s
}

/// Normalization-aware path equality.
pub fn path_equal(a: &str, b: &str) -> bool {
    normalize_path(a) == normalize_path(b)
}

/// Resolve `target` against the directory of `origin`, collapsing `.` and
/// `..` segments. Both inputs and the result are vault-relative.
pub fn resolve_relative(origin: &str, target: &str) -> String {
    let origin = normalize_path(origin);
    let dir = match origin.rfind('/') {
        Some(idx) => &origin[..idx],
        None => "",
    };
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    let target = normalize_path(target);
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes_and_dot_segments() {
        assert_eq!(normalize_path("notes\\daily\\a.md"), "notes/daily/a.md");
        assert_eq!(normalize_path("./out.md"), "out.md");
        assert_eq!(normalize_path("notes/./a.md"), "notes/a.md");
    }

    #[test]
    fn path_equal_ignores_spelling_differences() {
        assert!(path_equal("./used_links.md", "used_links.md"));
        assert!(path_equal("notes\\out.md", "notes/./out.md"));
        assert!(!path_equal("a.md", "b.md"));
    }

    #[test]
    fn resolves_relative_references() {
        assert_eq!(resolve_relative("notes/daily/a.md", "../ideas/b.md"), "notes/ideas/b.md");
        assert_eq!(resolve_relative("a.md", "b.md"), "b.md");
        assert_eq!(resolve_relative("notes/a.md", "./b.md"), "notes/b.md");
        // Walking past the vault root stops at the root
        assert_eq!(resolve_relative("a.md", "../../b.md"), "b.md");
    }
}
