use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Compression level must be between 0 and 9, got: {level}")]
    InvalidCompression { level: i32 },

    #[error("Cannot parse global attributes file {path}: {reason}")]
    InvalidAttrsFile { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library error: {0}")]
    Lib(#[from] cdrkit::Error),
}
