// Traded pick ledger file (TOML `[[picks]]` tables).

use std::path::{Path, PathBuf};

use pickwatch_core::{LedgerError, OverrideRegistry, PickLedger};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LedgerFileError {
    #[error("failed to read ledger {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse ledger {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid ledger {path}: {source}")]
    Invalid { path: PathBuf, source: LedgerError },
}

pub fn parse_ledger(text: &str) -> Result<PickLedger, toml::de::Error> {
    toml::from_str(text)
}

/// Read the ledger and check every pick against `registry` before anything
/// is resolved.
pub fn load_ledger(path: &Path, registry: &OverrideRegistry) -> Result<PickLedger, LedgerFileError> {
    let text = std::fs::read_to_string(path).map_err(|e| LedgerFileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let ledger = parse_ledger(&text).map_err(|e| LedgerFileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    ledger
        .validate(registry)
        .map_err(|e| LedgerFileError::Invalid {
            path: path.to_path_buf(),
            source: e,
        })?;
    info!("Loaded {} traded picks from {}", ledger.len(), path.display());
    Ok(ledger)
}
