//! Error types for align-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from align-core
    #[error(transparent)]
    Core(#[from] align_core::Error),

    /// Error from align-config
    #[error(transparent)]
    Config(#[from] align_config::Error),

    /// Error from align-fs
    #[error(transparent)]
    Fs(#[from] align_fs::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
