use std::fmt;

use thiserror::Error;

pub type RequestId = u64;
pub type DebounceGeneration = u64;

/// A file sent to the project analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// A response body the service produced and we understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Report { summary: String, suggestion: String },
    /// The service answered, but reported a logical error of its own.
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisOutcome, AnalysisError>,
    },
    ProjectAnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisOutcome, AnalysisError>,
    },
    HealthChecked(Result<String, AnalysisError>),
    DebounceElapsed {
        generation: DebounceGeneration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AnalysisError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalysisError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] AnalysisError),
}
