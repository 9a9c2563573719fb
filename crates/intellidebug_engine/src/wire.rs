//! JSON bodies exchanged with the analysis service.
//!
//! The HTTP status is never consulted; only the body decides the outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, AnalysisOutcome, FailureKind, SourceFile};

#[derive(Debug, Serialize)]
pub(crate) struct DebugRequest<'a> {
    pub code: &'a str,
}

/// `POST /analyze_project` takes a flat `{ file name: content }` object.
pub(crate) fn project_request(files: &[SourceFile]) -> BTreeMap<&str, &str> {
    files
        .iter()
        .map(|file| (file.name.as_str(), file.content.as_str()))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultBody {
    Report { summary: String, suggestion: String },
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct DebugResponse {
    result: Option<ResultBody>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    project_analysis: Option<ResultBody>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RootResponse {
    message: String,
}

pub(crate) fn parse_debug_response(body: &[u8]) -> Result<AnalysisOutcome, AnalysisError> {
    let parsed: DebugResponse = serde_json::from_slice(body).map_err(malformed)?;
    into_outcome(parsed.result, parsed.error)
}

pub(crate) fn parse_project_response(body: &[u8]) -> Result<AnalysisOutcome, AnalysisError> {
    let parsed: ProjectResponse = serde_json::from_slice(body).map_err(malformed)?;
    into_outcome(parsed.project_analysis, parsed.error)
}

pub(crate) fn parse_root_response(body: &[u8]) -> Result<String, AnalysisError> {
    let parsed: RootResponse = serde_json::from_slice(body).map_err(malformed)?;
    Ok(parsed.message)
}

fn into_outcome(
    result: Option<ResultBody>,
    error: Option<String>,
) -> Result<AnalysisOutcome, AnalysisError> {
    match (result, error) {
        (
            Some(ResultBody::Report {
                summary,
                suggestion,
            }),
            _,
        ) => Ok(AnalysisOutcome::Report {
            summary,
            suggestion,
        }),
        (Some(ResultBody::Error { error }), _) | (None, Some(error)) => {
            Ok(AnalysisOutcome::Rejected { error })
        }
        (None, None) => Err(AnalysisError::new(
            FailureKind::MalformedResponse,
            "response carries neither a result nor an error",
        )),
    }
}

fn malformed(err: serde_json::Error) -> AnalysisError {
    AnalysisError::new(FailureKind::MalformedResponse, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_is_parsed() {
        let body = br#"{"result":{"summary":"S","suggestion":"T"}}"#;
        assert_eq!(
            parse_debug_response(body).unwrap(),
            AnalysisOutcome::Report {
                summary: "S".into(),
                suggestion: "T".into()
            }
        );
    }

    #[test]
    fn nested_and_top_level_errors_pass_through() {
        let nested = br#"{"result":{"error":"Both APIs failed"}}"#;
        assert_eq!(
            parse_debug_response(nested).unwrap(),
            AnalysisOutcome::Rejected {
                error: "Both APIs failed".into()
            }
        );

        let top = br#"{"error":"No code provided"}"#;
        assert_eq!(
            parse_debug_response(top).unwrap(),
            AnalysisOutcome::Rejected {
                error: "No code provided".into()
            }
        );
    }

    #[test]
    fn unexpected_shapes_are_malformed() {
        for body in [
            &br#"{"detail":"validation"}"#[..],
            &br#"{"result":{"summary":"only"}}"#[..],
            &b"not json"[..],
            &b""[..],
        ] {
            let err = parse_debug_response(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedResponse);
        }
    }

    #[test]
    fn project_body_is_flat_map() {
        let files = vec![
            SourceFile {
                name: "utils.py".into(),
                content: "def f(): pass".into(),
            },
            SourceFile {
                name: "app.py".into(),
                content: "from utils import f".into(),
            },
        ];
        let json = serde_json::to_value(project_request(&files)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"app.py": "from utils import f", "utils.py": "def f(): pass"})
        );
    }

    #[test]
    fn project_response_uses_project_analysis_key() {
        let body = br#"{"project_analysis":{"summary":"ok","suggestion":"none"}}"#;
        assert_eq!(
            parse_project_response(body).unwrap(),
            AnalysisOutcome::Report {
                summary: "ok".into(),
                suggestion: "none".into()
            }
        );
    }

    #[test]
    fn root_message_is_read() {
        let body = br#"{"message":"Backend is running"}"#;
        assert_eq!(parse_root_response(body).unwrap(), "Backend is running");
    }
}
