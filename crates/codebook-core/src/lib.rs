//! Codebook lookups.
//!
//! Resolves opaque item encodings such as `v_0071` to their label, type,
//! owning group and response options.

#![deny(unsafe_code)]

pub mod accessor;

pub use accessor::CodebookAccessor;
pub use codebook_model::{CodebookError, Result};
