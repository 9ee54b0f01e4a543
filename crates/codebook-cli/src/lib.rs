//! Library components of the codebook CLI.

pub mod logging;
pub mod report;
