use crate::{AppState, Effect, Msg, ProjectFile};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_draft(text);
            let generation = state.bump_generation();
            state.set_debounce_pending(true);
            vec![Effect::ScheduleDebounce {
                generation,
                delay: state.debounce(),
            }]
        }
        Msg::DebounceElapsed { generation } => {
            // A newer edit rescheduled the timer; this expiry is stale.
            if generation != state.generation() {
                return (state, Vec::new());
            }
            state.set_debounce_pending(false);
            let code = state.draft().to_owned();
            submit(&mut state, code)
        }
        Msg::SubmitClicked => {
            // The submit control is disabled while a request is in flight.
            if state.is_loading() {
                return (state, Vec::new());
            }
            let code = state.draft().to_owned();
            submit(&mut state, code)
        }
        Msg::ClearDraft => {
            state.set_draft(String::new());
            state.bump_generation();
            state.set_debounce_pending(false);
            Vec::new()
        }
        Msg::ProjectSubmitted(files) => {
            let files: Vec<ProjectFile> = files
                .into_iter()
                .filter(|file| !file.content.trim().is_empty())
                .collect();
            if files.is_empty() {
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::AnalyzeProject { request_id, files }]
        }
        Msg::AnalysisCompleted { request_id, result }
        | Msg::ProjectAnalysisCompleted { request_id, result } => {
            state.complete_request(request_id, result);
            Vec::new()
        }
        Msg::ServiceChecked(status) => {
            state.set_service(status);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState, code: String) -> Vec<Effect> {
    if code.trim().is_empty() {
        return Vec::new();
    }
    let request_id = state.begin_request();
    vec![Effect::Analyze { request_id, code }]
}
