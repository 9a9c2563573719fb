/// Message shown whenever a request failed or its response could not be understood.
pub const UNREACHABLE_MESSAGE: &str = "⚠️ Backend not reachable or error in request";

/// Outcome of one analysis request, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Report { summary: String, suggestion: String },
    Failure { error: String },
}

impl AnalysisResult {
    pub fn report(summary: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Report {
            summary: summary.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// The single fallback value for transport and parsing failures.
    pub fn unreachable() -> Self {
        Self::failure(UNREACHABLE_MESSAGE)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// One named source file submitted for project analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub name: String,
    pub content: String,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Reachability of the analysis service as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Online { message: String },
    Offline { error: String },
}
