//! Preset lifecycle commands: add, list, remove, set.
//!
//! Every mutation is persisted immediately, so a sequence of edits survives
//! even if a later one fails.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::loader::{load_settings, save_settings};
use crate::config::{Preset, Settings};
use crate::error::IndexerError;

#[derive(Args)]
pub struct VaultArg {
    /// Vault directory (defaults to the current directory)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub vault: PathBuf,
}

#[derive(Subcommand)]
pub enum PresetCmd {
    /// Add a preset with default settings
    Add {
        #[command(flatten)]
        vault: VaultArg,

        /// Preset name (defaults to the current timestamp)
        #[arg(long)]
        name: Option<String>,

        /// Report output path (defaults to used_links_<name>.md)
        #[arg(long, value_name = "PATH")]
        output: Option<String>,
    },

    /// List configured presets
    List {
        #[command(flatten)]
        vault: VaultArg,
    },

    /// Remove a preset
    Remove {
        #[command(flatten)]
        vault: VaultArg,

        /// Name of the preset to remove
        name: String,
    },

    /// Change one field of a preset
    Set {
        #[command(flatten)]
        vault: VaultArg,

        /// Preset to edit
        name: String,

        /// Field to change (e.g. include_embeds, exclude_from_globs)
        field: String,

        /// New value; lists are comma-separated
        value: String,
    },
}

pub fn run(cmd: PresetCmd) -> Result<()> {
    match cmd {
        PresetCmd::Add { vault, name, output } => {
            let mut settings = load_settings(&vault.vault)?;
            let name = name.unwrap_or_else(Preset::timestamp_name);
            if settings.find(&name).is_some() {
                return Err(IndexerError::DuplicatePresetName(name).into());
            }
            let mut preset = Preset::with_name(name);
            if let Some(output) = output {
                preset.output_path = output;
            }
            println!("added preset '{}' -> {}", preset.name, preset.output_path);
            settings.presets.push(preset);
            warn_on_collisions(&settings);
            save_settings(&vault.vault, &settings)
        }
        PresetCmd::List { vault } => {
            let settings = load_settings(&vault.vault)?;
            if settings.presets.is_empty() {
                println!("no presets configured");
                return Ok(());
            }
            for p in &settings.presets {
                let mut flags = Vec::new();
                if p.include_embeds {
                    flags.push("embeds");
                }
                if p.nonexistent_only {
                    flags.push("nonexistent-only");
                }
                if !p.strict_line_breaks {
                    flags.push("compact");
                }
                println!("{} -> {} [{}]", p.name, p.output_path, flags.join(", "));
            }
            Ok(())
        }
        PresetCmd::Remove { vault, name } => {
            let mut settings = load_settings(&vault.vault)?;
            let before = settings.presets.len();
            settings.presets.retain(|p| p.name != name);
            if settings.presets.len() == before {
                return Err(IndexerError::PresetNotFound(name).into());
            }
            println!("removed preset '{name}'");
            save_settings(&vault.vault, &settings)
        }
        PresetCmd::Set { vault, name, field, value } => {
            let mut settings = load_settings(&vault.vault)?;
            let Some(preset) = settings.presets.iter_mut().find(|p| p.name == name) else {
                return Err(IndexerError::PresetNotFound(name).into());
            };
            preset.set_field(&field, &value)?;
            // A rename may collide with another preset's command name; save_settings
            // re-validates and rejects it before anything is persisted.
            warn_on_collisions(&settings);
            save_settings(&vault.vault, &settings)?;
            println!("set {field} = {value} on preset '{name}'");
            Ok(())
        }
    }
}

/// Shared output paths are allowed (last writer wins at generate time) but
/// worth flagging when the configuration introduces one.
fn warn_on_collisions(settings: &Settings) {
    for path in settings.output_collisions() {
        eprintln!("warning: multiple presets write to '{path}'; the last run wins");
    }
}
