//! Codebook file loading.

use std::path::Path;

use codebook_model::Codebook;
use tracing::debug;

use crate::error::{LoadError, Result};

/// Parse a codebook from JSON text.
///
/// The document is a list of group records; see [`codebook_model::Group`]
/// for the accepted shape of each record.
pub fn parse_codebook(text: &str) -> serde_json::Result<Codebook> {
    serde_json::from_str(text.trim_start_matches('\u{feff}'))
}

/// Read and parse a codebook JSON file.
pub fn load_codebook(path: &Path) -> Result<Codebook> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
    let codebook = parse_codebook(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        groups = codebook.len(),
        items = codebook.item_count(),
        "loaded codebook"
    );
    Ok(codebook)
}
