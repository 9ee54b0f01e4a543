#![deny(unsafe_code)]

pub mod codebook;
pub mod error;
pub mod options;
pub mod table;

pub use codebook::{Codebook, Group, Item, ItemMap};
pub use error::{CodebookError, Result};
pub use options::OptionSet;
pub use table::DataTable;
