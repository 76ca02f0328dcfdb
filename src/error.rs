//! Error types for the host-facing surfaces
//!
//! The engine hooks themselves are total. Only config loading, state files
//! and the HTTP server can fail.

/// Result type for persona operations
pub type Result<T> = std::result::Result<T, PersonaError>;

#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    /// Config extraction failed (bad TOML, bad env value)
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Persisted state blob could not be decoded or encoded
    #[error("State serialization error: {0}")]
    State(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP host failed to bind or serve
    #[error("Server error: {0}")]
    Server(String),
}

impl From<figment::Error> for PersonaError {
    fn from(err: figment::Error) -> Self {
        PersonaError::Config(Box::new(err))
    }
}
