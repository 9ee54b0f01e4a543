#![deny(unsafe_code)]

pub mod codebook;
pub mod config;
pub mod csv_table;
pub mod error;

pub use codebook::{load_codebook, parse_codebook};
pub use config::{DATA_DIR_ENV_VAR, SourceConfig, default_data_root, parse_delimiter};
pub use csv_table::{DEFAULT_DELIMITER, read_data_table};
pub use error::{LoadError, Result};
