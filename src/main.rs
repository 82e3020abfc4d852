//! link-indexer: reverse-link usage reports for markdown vaults
//!
//! This tool scans a directory of interlinked markdown documents, resolves
//! every outgoing link and embed to a canonical target, and writes per-preset
//! reports listing each target with its occurrence count.

use anyhow::Result;

mod cli;
mod config;
mod corpus;
mod error;
mod index;
mod report;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
