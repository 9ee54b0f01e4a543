//! Input source configuration.
//!
//! Resolution order, lowest to highest precedence:
//! 1. built-in file names under the data root
//! 2. a TOML file (`codebook`, `data`, `delimiter` keys)
//! 3. explicit overrides applied by the caller (CLI flags)
//!
//! The data root is `$CODEBOOK_DATA_DIR` when set, otherwise `./data`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::csv_table::DEFAULT_DELIMITER;
use crate::error::{LoadError, Result};

/// Environment variable for overriding the data root.
pub const DATA_DIR_ENV_VAR: &str = "CODEBOOK_DATA_DIR";

pub const DEFAULT_CODEBOOK_FILE: &str = "codebook.json";
pub const DEFAULT_DATA_FILE: &str = "data_project_metset.csv";

/// Get the data root directory.
pub fn default_data_root() -> PathBuf {
    data_root_from(std::env::var_os(DATA_DIR_ENV_VAR))
}

fn data_root_from(value: Option<OsString>) -> PathBuf {
    match value {
        Some(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from("data"),
    }
}

/// Where the codebook and respondent data live, and how to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub codebook: PathBuf,
    pub data: PathBuf,
    pub delimiter: u8,
}

/// On-disk shape of a source config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceFile {
    codebook: Option<PathBuf>,
    data: Option<PathBuf>,
    delimiter: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::from_root(&default_data_root())
    }
}

impl SourceConfig {
    pub fn from_root(root: &Path) -> Self {
        Self {
            codebook: root.join(DEFAULT_CODEBOOK_FILE),
            data: root.join(DEFAULT_DATA_FILE),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Load a TOML config file on top of the defaults.
    ///
    /// Relative paths in the file resolve against the file's directory.
    pub fn load_toml(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::parse_toml(&text, base).map_err(|error| match error {
            ParseError::Toml(source) => LoadError::Toml {
                path: path.to_path_buf(),
                source,
            },
            ParseError::Load(error) => error,
        })?;
        debug!(path = %path.display(), ?config, "loaded source config");
        Ok(config)
    }

    fn parse_toml(text: &str, base: &Path) -> std::result::Result<Self, ParseError> {
        let file: SourceFile = toml::from_str(text).map_err(ParseError::Toml)?;
        let mut config = Self::default();
        if let Some(codebook) = file.codebook {
            config.codebook = base.join(codebook);
        }
        if let Some(data) = file.data {
            config.data = base.join(data);
        }
        if let Some(delimiter) = file.delimiter {
            config.delimiter = parse_delimiter(&delimiter).map_err(ParseError::Load)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_codebook(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.codebook = path;
        }
        self
    }

    #[must_use]
    pub fn with_data(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data = path;
        }
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

enum ParseError {
    Toml(toml::de::Error),
    Load(LoadError),
}

/// Parse a delimiter given as text. Accepts a single ASCII character,
/// `\t`, or `tab`.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" | "TAB" => return Ok(b'\t'),
        _ => {}
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
        _ => Err(LoadError::InvalidDelimiter {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delimiters() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn data_root_falls_back_to_data_dir() {
        assert_eq!(data_root_from(None), PathBuf::from("data"));
        assert_eq!(data_root_from(Some(OsString::new())), PathBuf::from("data"));
        assert_eq!(
            data_root_from(Some(OsString::from("/srv/survey"))),
            PathBuf::from("/srv/survey")
        );
    }

    #[cfg(unix)]
    #[test]
    fn data_root_keeps_non_utf8_paths() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/srv/umfrage-\xfc".to_vec());
        assert_eq!(data_root_from(Some(raw.clone())), PathBuf::from(raw));
    }

    #[test]
    fn toml_paths_resolve_against_base() {
        let text = "codebook = \"meta/cb.json\"\ndata = \"/abs/data.csv\"\ndelimiter = \",\"\n";
        let Ok(config) = SourceConfig::parse_toml(text, Path::new("project")) else {
            panic!("parse config");
        };
        assert_eq!(config.codebook, Path::new("project/meta/cb.json"));
        assert_eq!(config.data, Path::new("/abs/data.csv"));
        assert_eq!(config.delimiter, b',');
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let result = SourceConfig::parse_toml("codebok = \"x\"\n", Path::new(""));
        assert!(matches!(result, Err(ParseError::Toml(_))));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = SourceConfig::from_root(Path::new("root"))
            .with_codebook(Some(PathBuf::from("other.json")))
            .with_data(None);
        assert_eq!(config.codebook, PathBuf::from("other.json"));
        assert_eq!(config.data, Path::new("root").join(DEFAULT_DATA_FILE));
        assert_eq!(config.delimiter, b';');
    }
}
