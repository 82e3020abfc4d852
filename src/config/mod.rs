//! Preset configuration records.
//!
//! A preset is one independently configured report: inclusion flags, two
//! sided exclusion rules, and an output path. All fields besides `name` and
//! `output_path` carry serde defaults so configuration files written by older
//! versions keep loading as fields are added.

use crate::error::IndexerError;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub mod loader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub output_path: String,
    #[serde(default = "default_true")]
    pub include_embeds: bool,
    #[serde(default = "default_true")]
    pub link_to_files: bool,
    #[serde(default)]
    pub nonexistent_only: bool,
    #[serde(default = "default_true")]
    pub strict_line_breaks: bool,
    #[serde(default)]
    pub exclude_from_filenames: Vec<String>,
    #[serde(default)]
    pub exclude_from_globs: Vec<String>,
    #[serde(default)]
    pub exclude_to_filenames: Vec<String>,
    #[serde(default)]
    pub exclude_to_globs: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Preset {
    /// New preset with documented defaults and the output path derived from
    /// the name.
    pub fn with_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let output_path = format!("used_links_{name}.md");
        Self {
            name,
            output_path,
            include_embeds: true,
            link_to_files: true,
            nonexistent_only: false,
            strict_line_breaks: true,
            exclude_from_filenames: Vec::new(),
            exclude_from_globs: Vec::new(),
            exclude_to_filenames: Vec::new(),
            exclude_to_globs: Vec::new(),
        }
    }

    /// Default preset name: the current unix-millis timestamp.
    pub fn timestamp_name() -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }

    /// Field-by-field mutation used by `preset set`. List fields take
    /// comma-separated values; an empty value clears the list.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        fn parse_bool(field: &str, value: &str) -> Result<bool> {
            match value {
                "true" | "on" | "yes" | "1" => Ok(true),
                "false" | "off" | "no" | "0" => Ok(false),
                other => bail!("invalid boolean '{other}' for field '{field}'"),
            }
        }
        fn parse_list(value: &str) -> Vec<String> {
            value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
        }

        match field {
            "name" => self.name = value.to_string(),
            "output_path" => self.output_path = value.to_string(),
            "include_embeds" => self.include_embeds = parse_bool(field, value)?,
            "link_to_files" => self.link_to_files = parse_bool(field, value)?,
            "nonexistent_only" => self.nonexistent_only = parse_bool(field, value)?,
            "strict_line_breaks" => self.strict_line_breaks = parse_bool(field, value)?,
            "exclude_from_filenames" => self.exclude_from_filenames = parse_list(value),
            "exclude_from_globs" => self.exclude_from_globs = parse_list(value),
            "exclude_to_filenames" => self.exclude_to_filenames = parse_list(value),
            "exclude_to_globs" => self.exclude_to_globs = parse_list(value),
            other => bail!(
                "unknown preset field '{other}' (expected one of: name, output_path, \
                 include_embeds, link_to_files, nonexistent_only, strict_line_breaks, \
                 exclude_from_filenames, exclude_from_globs, exclude_to_filenames, \
                 exclude_to_globs)"
            ),
        }
        Ok(())
    }
}

/// The full persisted configuration: a collection of presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, rename = "preset")]
    pub presets: Vec<Preset>,
}

impl Settings {
    /// Reject duplicate preset names. Names key the command surface, so a
    /// rename must never silently collide with another preset.
    pub fn validate(&self) -> Result<(), IndexerError> {
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if !seen.insert(preset.name.as_str()) {
                return Err(IndexerError::DuplicatePresetName(preset.name.clone()));
            }
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// The global exclusion set: every preset's output path. Always applied
    /// source-side so no report ever indexes any report, itself included.
    pub fn global_excludes(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.output_path.clone()).collect()
    }

    /// Output paths shared by more than one preset. Last writer wins at
    /// generate time; callers surface this as a configuration-time warning.
    pub fn output_collisions(&self) -> Vec<String> {
        use crate::utils::normalize_path;
        let mut counts = std::collections::HashMap::new();
        for preset in &self.presets {
            *counts.entry(normalize_path(&preset.output_path)).or_insert(0usize) += 1;
        }
        let mut collisions: Vec<String> =
            counts.into_iter().filter(|(_, n)| *n > 1).map(|(p, _)| p).collect();
        collisions.sort();
        collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_name_derives_output_path_and_defaults() {
        let preset = Preset::with_name("weekly");
        assert_eq!(preset.output_path, "used_links_weekly.md");
        assert!(preset.include_embeds);
        assert!(preset.link_to_files);
        assert!(preset.strict_line_breaks);
        assert!(!preset.nonexistent_only);
        assert!(preset.exclude_from_globs.is_empty());
    }

    #[test]
    fn set_field_parses_booleans_and_lists() {
        let mut preset = Preset::with_name("p");
        preset.set_field("include_embeds", "false").unwrap();
        assert!(!preset.include_embeds);
        preset.set_field("exclude_from_globs", "daily/**, templates/**").unwrap();
        assert_eq!(preset.exclude_from_globs, vec!["daily/**", "templates/**"]);
        preset.set_field("exclude_from_globs", "").unwrap();
        assert!(preset.exclude_from_globs.is_empty());
        assert!(preset.set_field("include_embeds", "maybe").is_err());
        assert!(preset.set_field("no_such_field", "x").is_err());
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let settings = Settings {
            presets: vec![Preset::with_name("a"), Preset::with_name("b"), Preset::with_name("a")],
        };
        assert!(settings.validate().is_err());

        let ok = Settings { presets: vec![Preset::with_name("a"), Preset::with_name("b")] };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn global_excludes_lists_every_output_path() {
        let settings =
            Settings { presets: vec![Preset::with_name("a"), Preset::with_name("b")] };
        assert_eq!(
            settings.global_excludes(),
            vec!["used_links_a.md", "used_links_b.md"]
        );
    }

    #[test]
    fn output_collisions_are_normalization_aware() {
        let mut a = Preset::with_name("a");
        a.output_path = "./out.md".into();
        let mut b = Preset::with_name("b");
        b.output_path = "out.md".into();
        let settings = Settings { presets: vec![a, b] };
        assert_eq!(settings.output_collisions(), vec!["out.md"]);
    }
}
