use chrono::{DateTime, Local};
use intellidebug_core::{AppViewModel, ResultView, ServiceStatus};

use super::constants::*;

/// Renders the view as plain terminal lines.
pub fn render(view: &AppViewModel, result_at: Option<DateTime<Local>>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(RULE.to_string());
    lines.push(status_line(view));

    if let Some(result) = &view.result {
        let request = view
            .last_completed
            .map(|id| format!(" #{id}"))
            .unwrap_or_default();
        let stamp = result_at
            .map(|at| format!(" ({})", at.format("%H:%M:%S")))
            .unwrap_or_default();
        lines.push(format!("Result{request}{stamp}:"));
        match result {
            ResultView::Report {
                summary,
                suggestion,
            } => {
                lines.push(format!("Summary: {summary}"));
                lines.push(format!("Suggestion: {suggestion}"));
            }
            ResultView::Error(error) => lines.push(format!("Error: {error}")),
        }
    }

    lines
}

fn status_line(view: &AppViewModel) -> String {
    let status = if view.loading {
        STATUS_LOADING
    } else {
        STATUS_READY
    };
    let service = match &view.service {
        ServiceStatus::Unknown => "service: checking".to_string(),
        ServiceStatus::Online { .. } => "service: online".to_string(),
        ServiceStatus::Offline { error } => format!("service: offline ({error})"),
    };
    let mut line = format!(
        "{status} | draft: {} lines, {} chars | {service}",
        view.draft_lines, view.draft_chars
    );
    if view.in_flight > 1 {
        line.push_str(&format!(" | in flight: {}", view.in_flight));
    }
    if !view.submit_enabled {
        line.push_str(" | ");
        line.push_str(SUBMIT_DISABLED);
    }
    line
}

pub fn banner() -> Vec<String> {
    std::iter::once(TITLE.to_string())
        .chain(HELP.iter().map(|line| line.to_string()))
        .collect()
}
