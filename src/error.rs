use thiserror::Error;

/// Main error type for the clipfuse library
#[derive(Error, Debug)]
pub enum FuseError {
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    #[error("Media processing error: {0}")]
    Media(#[from] MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors from the duration-alignment core
#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Invalid {kind} duration: {duration} (must be > 0)")]
    InvalidDuration { kind: String, duration: f64 },

    #[error("Offset out of range: {name} = {value} (allowed magnitude {max})")]
    InvalidOffset { name: String, value: f64, max: f64 },
}

/// Errors from the external media tool collaborators
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media tool not available: {tool}")]
    ToolUnavailable { tool: String },

    #[error("Failed to probe media file: {path}")]
    ProbeFailed { path: String },

    #[error("Unparsable duration from probe of {path}: {raw}")]
    BadDuration { path: String, raw: String },

    #[error("Mux/encode failed for {output}: {reason}")]
    MuxFailed { output: String, reason: String },
}

/// Errors from the storage collaborator
///
/// Upload failure is a distinct variant rather than an empty-URL sentinel, so
/// callers can tell "upload failed" apart from "succeeded".
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Source file not found: {path}")]
    SourceMissing { path: String },

    #[error("Upload failed for {path}: {reason}")]
    UploadFailed { path: String, reason: String },

    #[error("Storage destination unavailable: {destination}")]
    DestinationUnavailable { destination: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using FuseError
pub type Result<T> = std::result::Result<T, FuseError>;

impl FuseError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO and transfer errors might be temporary
            Self::Io(_) => true,
            Self::Storage(StorageError::UploadFailed { .. }) => true,
            Self::Media(MediaError::ProbeFailed { .. }) => true,
            // Alignment and config errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Align(AlignError::InvalidDuration { kind, duration }) => {
                format!(
                    "The {} track reports a duration of {}s. Durations must be positive; \
                     check that the input file decoded correctly.",
                    kind, duration
                )
            }
            Self::Media(MediaError::ToolUnavailable { tool }) => {
                format!("'{}' was not found on PATH. Install ffmpeg to use clipfuse.", tool)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
