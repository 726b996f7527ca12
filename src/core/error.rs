//! Error types for the logging pipeline

use super::level::Level;
use std::fmt;

pub type Result<T> = std::result::Result<T, SyplError>;

#[derive(Debug, thiserror::Error)]
pub enum SyplError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A string that doesn't name any level
    #[error("invalid level: {value}, expected one of {valid}")]
    InvalidLevel { value: String, valid: String },

    /// A processor (or formatter) failed while running over a message
    #[error("Output: \"{output}\" Processor: \"{processor}\" Error: \"{source}\" Original Message: \"{original}\"")]
    Processing {
        output: String,
        processor: String,
        original: String,
        #[source]
        source: Box<SyplError>,
    },

    /// The destination of an output refused the write
    #[error("output: \"{output}\". error: \"{source}\"")]
    Write {
        output: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File output error with path
    #[error("File output error for '{path}': {message}")]
    FileOutput { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// Generic error, also what processors usually fail with
    #[error("{0}")]
    Other(String),
}

impl SyplError {
    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        SyplError::InvalidLevel {
            value: value.into(),
            valid: Level::join(&Level::ALL),
        }
    }

    /// Wrap a processor failure with the context it happened in
    pub fn processing(
        output: impl Into<String>,
        processor: impl Into<String>,
        original: &str,
        source: SyplError,
    ) -> Self {
        SyplError::Processing {
            output: output.into(),
            processor: processor.into(),
            original: original.trim_end_matches('\n').to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap a destination failure with the output name
    pub fn write(output: impl Into<String>, source: std::io::Error) -> Self {
        SyplError::Write {
            output: output.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        SyplError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file output error
    pub fn file_output(path: impl Into<String>, message: impl Into<String>) -> Self {
        SyplError::FileOutput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        SyplError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error, e.g. from inside a processor
    pub fn processor<S: Into<String>>(msg: S) -> Self {
        SyplError::Other(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SyplError::Other(msg.into())
    }
}

/// Marker carried inside an `io::Error` by destinations that were closed.
///
/// Writing to a closed destination is reported as a warning by the output,
/// never as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationClosed;

impl fmt::Display for DestinationClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write to closed destination")
    }
}

impl std::error::Error for DestinationClosed {}

impl DestinationClosed {
    /// Build the `io::Error` a closed destination returns
    pub fn io_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, DestinationClosed)
    }

    /// Whether `err` reports a closed destination
    pub fn is(err: &std::io::Error) -> bool {
        err.get_ref()
            .is_some_and(|inner| inner.is::<DestinationClosed>())
    }
}
