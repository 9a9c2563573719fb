use std::time::Duration;

use crate::{DebounceGeneration, ProjectFile, RequestId};

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any pending debounce timer with one that fires after `delay`
    /// and reports back `Msg::DebounceElapsed { generation }`.
    ScheduleDebounce {
        generation: DebounceGeneration,
        delay: Duration,
    },
    /// Send `code` to the analysis service.
    Analyze { request_id: RequestId, code: String },
    /// Send a set of files to the project-wide analysis endpoint.
    AnalyzeProject {
        request_id: RequestId,
        files: Vec<ProjectFile>,
    },
    /// Probe the service root once.
    CheckHealth,
}
