use crate::{AnalysisResult, DebounceGeneration, ProjectFile, RequestId, ServiceStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the draft; carries the full new text.
    InputChanged(String),
    /// User asked for an immediate analysis of the current draft.
    SubmitClicked,
    /// A debounce timer scheduled for `generation` ran to completion.
    DebounceElapsed { generation: DebounceGeneration },
    /// User discarded the draft.
    ClearDraft,
    /// User asked for a project-wide analysis of several files.
    ProjectSubmitted(Vec<ProjectFile>),
    /// Engine finished a single-file analysis.
    AnalysisCompleted {
        request_id: RequestId,
        result: AnalysisResult,
    },
    /// Engine finished a project analysis.
    ProjectAnalysisCompleted {
        request_id: RequestId,
        result: AnalysisResult,
    },
    /// Engine finished the startup health check.
    ServiceChecked(ServiceStatus),
}
