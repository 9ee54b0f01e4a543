use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodebookError {
    #[error("encoding not found in codebook: {encoding}")]
    EncodingNotFound { encoding: String },
}

impl CodebookError {
    pub fn encoding_not_found(encoding: impl Into<String>) -> Self {
        Self::EncodingNotFound {
            encoding: encoding.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodebookError>;
