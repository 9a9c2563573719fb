use crate::{AnalysisResult, RequestId, ServiceStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub draft_lines: usize,
    pub draft_chars: usize,
    pub loading: bool,
    pub in_flight: usize,
    pub submit_enabled: bool,
    pub result: Option<ResultView>,
    pub last_completed: Option<RequestId>,
    pub service: ServiceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Report { summary: String, suggestion: String },
    Error(String),
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        match result {
            AnalysisResult::Report {
                summary,
                suggestion,
            } => ResultView::Report {
                summary: summary.clone(),
                suggestion: suggestion.clone(),
            },
            AnalysisResult::Failure { error } => ResultView::Error(error.clone()),
        }
    }
}
