//! IntelliDebug engine: analysis-service client, debounce timer and effect execution.
mod client;
mod debounce;
mod engine;
mod types;
mod wire;

pub use client::{Analyzer, ClientSettings, ReqwestAnalyzer, DEFAULT_ENDPOINT};
pub use debounce::Debouncer;
pub use engine::EngineHandle;
pub use types::{
    AnalysisError, AnalysisOutcome, DebounceGeneration, EngineError, EngineEvent, FailureKind,
    RequestId, SourceFile,
};
