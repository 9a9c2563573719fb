use std::sync::{Arc, Mutex};
use std::time::Duration;

use intellidebug_engine::{
    AnalysisError, AnalysisOutcome, Analyzer, EngineEvent, EngineHandle, SourceFile,
};
use pretty_assertions::assert_eq;

/// Echoes the code back as the summary; `slow:` prefixed code takes longer.
#[derive(Default)]
struct EchoAnalyzer {
    seen: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Analyzer for EchoAnalyzer {
    async fn analyze(&self, code: &str) -> Result<AnalysisOutcome, AnalysisError> {
        self.seen.lock().unwrap().push(code.to_string());
        if code.starts_with("slow:") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(AnalysisOutcome::Report {
            summary: code.to_string(),
            suggestion: String::new(),
        })
    }

    async fn analyze_project(
        &self,
        files: &[SourceFile],
    ) -> Result<AnalysisOutcome, AnalysisError> {
        Ok(AnalysisOutcome::Report {
            summary: format!("{} files", files.len()),
            suggestion: String::new(),
        })
    }

    async fn health(&self) -> Result<String, AnalysisError> {
        Ok("up".to_string())
    }
}

fn wait_for(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn overlapping_requests_complete_in_arrival_order() {
    let analyzer = Arc::new(EchoAnalyzer::default());
    let engine = EngineHandle::with_analyzer(analyzer.clone()).expect("engine starts");

    engine.analyze(1, "slow:first");
    engine.analyze(2, "second");

    let first = wait_for(&engine);
    let second = wait_for(&engine);
    let ids: Vec<_> = [first, second]
        .into_iter()
        .map(|event| match event {
            EngineEvent::AnalysisCompleted { request_id, .. } => request_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(analyzer.seen.lock().unwrap().len(), 2);
}

#[test]
fn debounce_burst_reports_only_latest_generation() {
    let engine =
        EngineHandle::with_analyzer(Arc::new(EchoAnalyzer::default())).expect("engine starts");

    for generation in 1..=3 {
        engine.schedule_debounce(generation, Duration::from_millis(100));
    }

    assert_eq!(
        wait_for(&engine),
        EngineEvent::DebounceElapsed { generation: 3 }
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(300)), None);
}

#[test]
fn project_and_health_events_are_reported() {
    let engine =
        EngineHandle::with_analyzer(Arc::new(EchoAnalyzer::default())).expect("engine starts");

    engine.check_health();
    assert_eq!(
        wait_for(&engine),
        EngineEvent::HealthChecked(Ok("up".to_string()))
    );

    engine.analyze_project(
        7,
        vec![SourceFile {
            name: "a.py".to_string(),
            content: "pass".to_string(),
        }],
    );
    assert_eq!(
        wait_for(&engine),
        EngineEvent::ProjectAnalysisCompleted {
            request_id: 7,
            result: Ok(AnalysisOutcome::Report {
                summary: "1 files".to_string(),
                suggestion: String::new(),
            }),
        }
    );
}
