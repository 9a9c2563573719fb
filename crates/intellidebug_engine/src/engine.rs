use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::client::{Analyzer, ClientSettings, ReqwestAnalyzer};
use crate::debounce::Debouncer;
use crate::{DebounceGeneration, EngineError, EngineEvent, RequestId, SourceFile};

enum EngineCommand {
    Analyze { request_id: RequestId, code: String },
    AnalyzeProject {
        request_id: RequestId,
        files: Vec<SourceFile>,
    },
    CheckHealth,
    ScheduleDebounce {
        generation: DebounceGeneration,
        delay: Duration,
    },
}

/// Owns the engine thread. Commands go in, [`EngineEvent`]s come out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let analyzer = ReqwestAnalyzer::new(settings)?;
        Self::with_analyzer(Arc::new(analyzer))
    }

    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("intellidebug-engine".to_string())
            .spawn(move || {
                let mut debouncer = Debouncer::new(runtime.handle().clone());
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::ScheduleDebounce { generation, delay } => {
                            engine_debug!(
                                "Debounce generation={} delay_ms={}",
                                generation,
                                delay.as_millis()
                            );
                            let event_tx = event_tx.clone();
                            debouncer.reschedule(delay, move || {
                                let _ = event_tx.send(EngineEvent::DebounceElapsed { generation });
                            });
                        }
                        command => {
                            let analyzer = analyzer.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                handle_command(analyzer.as_ref(), command, event_tx).await;
                            });
                        }
                    }
                }
                engine_info!("Engine command channel closed; shutting down");
                drop(debouncer);
                drop(runtime);
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn analyze(&self, request_id: RequestId, code: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            code: code.into(),
        });
    }

    pub fn analyze_project(&self, request_id: RequestId, files: Vec<SourceFile>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::AnalyzeProject { request_id, files });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    /// Replaces any pending debounce timer.
    pub fn schedule_debounce(&self, generation: DebounceGeneration, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleDebounce { generation, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Analyze { request_id, code } => {
            let result = analyzer.analyze(&code).await;
            log_completion(request_id, &result);
            EngineEvent::AnalysisCompleted { request_id, result }
        }
        EngineCommand::AnalyzeProject { request_id, files } => {
            let result = analyzer.analyze_project(&files).await;
            log_completion(request_id, &result);
            EngineEvent::ProjectAnalysisCompleted { request_id, result }
        }
        EngineCommand::CheckHealth => {
            let result = analyzer.health().await;
            match &result {
                Ok(message) => engine_info!("Analysis service online: {}", message),
                Err(err) => engine_warn!("Analysis service unreachable: {}", err),
            }
            EngineEvent::HealthChecked(result)
        }
        // Handled on the engine thread.
        EngineCommand::ScheduleDebounce { .. } => return,
    };
    let _ = event_tx.send(event);
}

fn log_completion<T>(request_id: RequestId, result: &Result<T, crate::AnalysisError>) {
    match result {
        Ok(_) => engine_info!("Request {} completed", request_id),
        Err(err) => engine_warn!("Request {} failed: {}", request_id, err),
    }
}
