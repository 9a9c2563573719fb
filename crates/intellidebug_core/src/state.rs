use std::time::Duration;

use crate::view_model::{AppViewModel, ResultView};
use crate::{AnalysisResult, Effect, ServiceStatus};

pub type RequestId = u64;
pub type DebounceGeneration = u64;

/// Quiet period after the last edit before the draft is submitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    draft: String,
    debounce: Duration,
    generation: DebounceGeneration,
    debounce_pending: bool,
    next_request_id: RequestId,
    in_flight: usize,
    result: Option<AnalysisResult>,
    last_completed: Option<RequestId>,
    service: ServiceStatus,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            draft: String::new(),
            debounce,
            generation: 0,
            debounce_pending: false,
            next_request_id: 1,
            in_flight: 0,
            result: None,
            last_completed: None,
            service: ServiceStatus::Unknown,
            dirty: false,
        }
    }

    /// Effects the platform should run once before the first message.
    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![Effect::CheckHealth]
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn generation(&self) -> DebounceGeneration {
        self.generation
    }

    /// True between an edit and the expiry (or invalidation) of its debounce window.
    pub fn has_pending_debounce(&self) -> bool {
        self.debounce_pending
    }

    /// Nothing is scheduled and nothing is in flight.
    pub fn is_settled(&self) -> bool {
        !self.debounce_pending && self.in_flight == 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            draft_lines: if self.draft.is_empty() {
                0
            } else {
                self.draft.lines().count().max(1)
            },
            draft_chars: self.draft.chars().count(),
            loading: self.is_loading(),
            in_flight: self.in_flight,
            submit_enabled: !self.is_loading(),
            result: self.result.as_ref().map(ResultView::from),
            last_completed: self.last_completed,
            service: self.service.clone(),
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft = text;
        self.mark_dirty();
    }

    /// Invalidates any pending debounce timer and returns the new generation.
    pub(crate) fn bump_generation(&mut self) -> DebounceGeneration {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn set_debounce_pending(&mut self, pending: bool) {
        self.debounce_pending = pending;
    }

    /// Registers a new in-flight request.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight += 1;
        self.mark_dirty();
        id
    }

    /// Applies a completed request. The latest completion wins regardless of
    /// which request was started last.
    pub(crate) fn complete_request(&mut self, request_id: RequestId, result: AnalysisResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.result = Some(result);
        self.last_completed = Some(request_id);
        self.mark_dirty();
    }

    pub(crate) fn set_service(&mut self, status: ServiceStatus) {
        if self.service != status {
            self.service = status;
            self.mark_dirty();
        }
    }
}
