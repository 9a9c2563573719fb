//! IntelliDebug core: pure debounced-submission state machine and view-model helpers.
mod effect;
mod msg;
mod result;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use result::{AnalysisResult, ProjectFile, ServiceStatus, UNREACHABLE_MESSAGE};
pub use state::{AppState, DebounceGeneration, RequestId, DEFAULT_DEBOUNCE};
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
