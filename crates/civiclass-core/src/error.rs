//! Error types for Civiclass

/// Result type alias using Civiclass's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Civiclass operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Category catalog errors (invalid definitions, load failures)
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Classification engine errors
    #[error("engine error: {0}")]
    Engine(String),

    /// Event pipeline errors (malformed payloads, processing failures)
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Broker transport errors (connect, declare, publish, ack)
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a new pipeline error
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
