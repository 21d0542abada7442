//! Reads asset definition files from disk.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ManagerError;
use crate::types::{AssetDefinition, AssetKind};

/// Reads the JSON file at `path` and validates it as a `kind` definition.
///
/// # Errors
///
/// Returns `ManagerError::Read` if the file cannot be read,
/// `ManagerError::Parse` if it is not JSON, and `ManagerError::MissingName`
/// if it has no usable name for `kind`.
pub fn load_definition(path: &Path, kind: AssetKind) -> Result<AssetDefinition, ManagerError> {
    let content = fs::read_to_string(path).map_err(|cause| ManagerError::Read {
        path: path.to_path_buf(),
        cause,
    })?;

    info!(path = %path.display(), "about to parse supplied file");
    let document = serde_json::from_str(&content).map_err(|cause| ManagerError::Parse {
        path: path.to_path_buf(),
        cause,
    })?;

    AssetDefinition::new(kind, document)
}
