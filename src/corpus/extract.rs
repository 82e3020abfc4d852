//! Reference extraction from markdown text.
//!
//! Produces the raw outgoing-reference lists the pipeline consumes: wikilinks
//! (`[[Target]]`, `[[Target|alias]]`, `[[Target#section]]`), markdown links
//! (`[text](Target.md)`), and their embed forms (`![[Target]]`,
//! `![alt](img.png)`). External URLs and pure `#anchor` links are not
//! references. Text inside fenced code blocks and inline code spans is
//! ignored.

use crate::corpus::OutgoingRefs;
use once_cell::sync::Lazy;
use regex::Regex;

static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[\[([^\[\]]+?)\]\]").expect("valid wikilink regex"));

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[[^\]]*\]\(([^()]+)\)").expect("valid markdown link regex"));

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]*`").expect("valid inline code regex"));

/// Extract all outgoing references from one document, in source order.
pub fn extract_references(content: &str) -> OutgoingRefs {
    let mut refs = OutgoingRefs::default();
    let mut in_fence = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let line = INLINE_CODE.replace_all(line, "");

        for cap in WIKILINK.captures_iter(&line) {
            let is_embed = !cap[1].is_empty();
            if let Some(target) = wikilink_target(&cap[2]) {
                push(&mut refs, target, is_embed);
            }
        }
        for cap in MARKDOWN_LINK.captures_iter(&line) {
            let is_embed = !cap[1].is_empty();
            if let Some(target) = markdown_target(&cap[2]) {
                push(&mut refs, target, is_embed);
            }
        }
    }

    refs
}

fn push(refs: &mut OutgoingRefs, target: String, is_embed: bool) {
    if is_embed {
        refs.embeds.push(target);
    } else {
        refs.links.push(target);
    }
}

/// Target part of a wikilink body: the text before any `|alias`.
fn wikilink_target(body: &str) -> Option<String> {
    let target = body.split('|').next().unwrap_or(body).trim();
    if target.is_empty() || target.starts_with('#') {
        return None;
    }
    Some(target.to_string())
}

/// Target of a markdown link, or `None` for external URLs and anchors.
fn markdown_target(dest: &str) -> Option<String> {
    // Drop an optional quoted title: [x](path "title")
    let dest = dest.split_whitespace().next()?;
    let dest = dest.trim_start_matches('<').trim_end_matches('>');
    if dest.is_empty() || dest.starts_with('#') {
        return None;
    }
    // Scheme-qualified destinations (https:, mailto:) are external.
    if dest
        .split_once(':')
        .map(|(scheme, _)| scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)))
        .unwrap_or(false)
    {
        return None;
    }
    Some(dest.to_string())
}
