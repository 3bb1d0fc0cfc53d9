use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session fetch failed: {0}")]
    Fetch(String),

    #[error("Session payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SessionError {
    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
