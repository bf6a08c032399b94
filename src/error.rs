//! Error types and handling infrastructure for vakit.
//!
//! Parsing and evaluation failures get their own small enums so callers can match on them
//! precisely; everything funnels into [`VakitError`] for the crate-level [`Result`] alias.
//!
//! ## Policy
//!
//! - **Parse errors** surface to whoever supplied the schedule so they can retry
//! - **Evaluation errors** at tick time degrade to a fallback render, never a crash
//! - **Sink errors** are isolated per sink and only surface in the tick's report

use crate::render::SinkId;
use crate::schedule::Prayer;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a `HH:MM` time-of-day string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input does not match `digits ":" digits`
    #[error("malformed time '{input}', expected HH:MM")]
    Malformed { input: String },

    /// Well-formed, but the hour or minute is outside the clock face
    #[error("time '{input}' out of range (hour {hour}, minute {minute})")]
    OutOfRange {
        input: String,
        hour: u32,
        minute: u32,
    },
}

impl ParseError {
    pub fn malformed(input: impl Into<String>) -> Self {
        Self::Malformed {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        match self {
            Self::Malformed { input } | Self::OutOfRange { input, .. } => input,
        }
    }
}

/// Failure to evaluate a stored schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// One of the six entries could not be parsed
    #[error("invalid schedule entry for {prayer:?}: {source}")]
    InvalidSchedule {
        prayer: Prayer,
        #[source]
        source: ParseError,
    },
}

/// Opaque failure reported by a display sink while rendering.
///
/// Sinks build these without knowing their own id; the coordinator stamps the id on with
/// [`SinkError::with_sink`] before the error lands in a tick report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("sink render failed: {message}")]
pub struct SinkError {
    sink: Option<SinkId>,
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            sink: None,
            message: message.into(),
        }
    }

    pub fn with_sink(mut self, id: SinkId) -> Self {
        self.sink = Some(id);
        self
    }

    pub fn sink(&self) -> Option<SinkId> {
        self.sink
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The main error type for vakit operations.
#[derive(Error, Debug)]
pub enum VakitError {
    /// A time string was rejected
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A schedule update carried an unparseable entry
    #[error("invalid {prayer:?} time: {source}")]
    InvalidEntry {
        prayer: Prayer,
        #[source]
        source: ParseError,
    },

    /// A stored schedule could not be evaluated
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Schedule persistence errors (file I/O, encoding)
    #[error("Schedule store failed: {message}")]
    StoreError { message: String },

    /// File system related errors
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Configuration file exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// The coordinator was asked to start outside a tokio runtime
    #[error("Runtime unavailable: {message}")]
    Runtime { message: String },
}

/// Standard Result type for vakit operations.
pub type Result<T> = std::result::Result<T, VakitError>;

impl VakitError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a StoreError with a descriptive message
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for VakitError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
