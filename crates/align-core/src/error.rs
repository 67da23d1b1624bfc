//! Error types for align-core

/// Result type for align-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, transforming or rendering server sets
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source payload could not be parsed
    #[error("Failed to parse {format} source: {message}")]
    SourceParse { format: &'static str, message: String },

    /// No profile is registered for the agent name
    #[error("Unsupported agent: {agent}")]
    UnsupportedAgent { agent: String },

    /// A destination transform rejected a server entry
    #[error("{agent} validation error: {message}")]
    Validation {
        agent: String,
        server: String,
        message: String,
    },

    /// Rendering a server set failed
    #[error("Failed to serialize server configuration: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The source produced no servers
    #[error("Server list cannot be empty")]
    EmptyServers,

    /// No destination agents were configured
    #[error("No target agents configured")]
    NoTargets,

    /// The home directory could not be determined
    #[error("Failed to determine the home directory")]
    HomeDirNotFound,

    /// Filesystem error from align-fs
    #[error(transparent)]
    Fs(#[from] align_fs::Error),
}

impl Error {
    pub fn source_parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::SourceParse {
            format,
            message: message.into(),
        }
    }
}
