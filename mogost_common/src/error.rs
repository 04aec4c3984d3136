use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read CSV file: {0}")]
    Csv(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Upload(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ToolkitError {
    /// True when the failure was caused by what the caller sent rather than by the toolkit.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ToolkitError::InvalidInput(_) | ToolkitError::Upload(_))
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
