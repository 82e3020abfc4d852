//! Error taxonomy for the indexing pipeline.

use thiserror::Error;

/// Errors surfaced by configuration handling and report generation.
///
/// Pipeline stages fail fast: the first error bubbles up to the CLI and no
/// partial report content is ever written.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// A command referenced a preset that is no longer configured.
    #[error("preset '{0}' was not found; check the configuration")]
    PresetNotFound(String),

    /// Two presets carry the same name. Names key the command surface, so
    /// duplicates would silently merge two reports.
    #[error("duplicate preset name '{0}'")]
    DuplicatePresetName(String),

    /// The report file could not be created or overwritten. The destination
    /// is left in its last-known-good state.
    #[error("failed to write report '{path}'")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
