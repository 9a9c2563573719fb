use engine_logging::{engine_debug, engine_info};
use intellidebug_core::{AnalysisResult, Effect, Msg, ProjectFile, ServiceStatus};
use intellidebug_engine::{
    AnalysisError, AnalysisOutcome, ClientSettings, EngineError, EngineEvent, EngineHandle,
    SourceFile,
};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        engine_info!("Analysis endpoint {}", settings.endpoint);
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce { generation, delay } => {
                    self.engine.schedule_debounce(generation, delay);
                }
                Effect::Analyze { request_id, code } => {
                    engine_info!("Analyze request_id={} code_len={}", request_id, code.len());
                    self.engine.analyze(request_id, code);
                }
                Effect::AnalyzeProject { request_id, files } => {
                    engine_info!(
                        "AnalyzeProject request_id={} files={}",
                        request_id,
                        files.len()
                    );
                    self.engine
                        .analyze_project(request_id, files.into_iter().map(to_source).collect());
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    /// Drains every engine event that is ready right now.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn to_source(file: ProjectFile) -> SourceFile {
    SourceFile {
        name: file.name,
        content: file.content,
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::AnalysisCompleted { request_id, result } => Msg::AnalysisCompleted {
            request_id,
            result: to_result(request_id, result),
        },
        EngineEvent::ProjectAnalysisCompleted { request_id, result } => {
            Msg::ProjectAnalysisCompleted {
                request_id,
                result: to_result(request_id, result),
            }
        }
        EngineEvent::HealthChecked(Ok(message)) => {
            Msg::ServiceChecked(ServiceStatus::Online { message })
        }
        EngineEvent::HealthChecked(Err(err)) => Msg::ServiceChecked(ServiceStatus::Offline {
            error: err.to_string(),
        }),
    }
}

/// Every transport or parsing failure collapses into the one unreachable message.
fn to_result(request_id: u64, result: Result<AnalysisOutcome, AnalysisError>) -> AnalysisResult {
    match result {
        Ok(AnalysisOutcome::Report {
            summary,
            suggestion,
        }) => AnalysisResult::report(summary, suggestion),
        Ok(AnalysisOutcome::Rejected { error }) => AnalysisResult::failure(error),
        Err(err) => {
            engine_debug!("Request {} mapped to unreachable ({})", request_id, err.kind);
            AnalysisResult::unreachable()
        }
    }
}
