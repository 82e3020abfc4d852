//! Generate command implementation.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::loader::load_settings;
use crate::corpus::FsVault;
use crate::error::IndexerError;
use crate::index::generate_report;
use crate::report::FsStorage;

#[derive(Args)]
pub struct GenerateArgs {
    /// Preset to run; all configured presets when omitted
    #[arg(value_name = "PRESET")]
    pub preset: Option<String>,

    /// Vault directory (defaults to the current directory)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub vault: PathBuf,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let settings = load_settings(&args.vault)?;
    if settings.presets.is_empty() {
        anyhow::bail!("no presets configured; add one with `link-indexer preset add`");
    }

    // Recomputed from the full preset list: every report path is excluded as
    // a source in every run, regardless of which preset is generated.
    let global_excludes = settings.global_excludes();

    let selected: Vec<_> = match &args.preset {
        Some(name) => {
            let preset = settings
                .find(name)
                .ok_or_else(|| IndexerError::PresetNotFound(name.clone()))?;
            vec![preset]
        }
        None => settings.presets.iter().collect(),
    };

    let vault = FsVault::open(&args.vault)
        .with_context(|| format!("failed opening vault {}", args.vault.display()))?;
    let mut storage = FsStorage::new(vault.root());

    for preset in selected {
        generate_report(&vault, &mut storage, preset, &global_excludes)?;
        println!("{}: wrote {}", preset.name, preset.output_path);
    }
    Ok(())
}
