//! Axum route handlers for the analyzer lifecycle: session lookup,
//! submit (extract + analyze), and reset.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::analysis;
use crate::errors::AppError;
use crate::extract;
use crate::session::{session_cookie, session_id_from_headers, SessionPhase};
use crate::state::AppState;

struct UploadedResume {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// GET /api/v1/session
///
/// Returns the session's current phase so a page reload can restore the
/// report. Establishes the session cookie on first contact.
pub async fn handle_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let id = session_id_from_headers(&headers).unwrap_or_else(Uuid::new_v4);
    let phase = state.sessions.phase(id).await;
    with_session_cookie(Json(phase).into_response(), id)
}

/// POST /api/v1/analyze
///
/// Multipart submit: `target_role` text field plus a `resume` file field.
/// Validation failures leave the session untouched. Once accepted, the
/// session is `Analyzing` until the pipeline finishes; any extraction or
/// model failure unwinds it to `Idle` before the error is returned.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let id = session_id_from_headers(&headers).unwrap_or_else(Uuid::new_v4);

    let mut target_role = String::new();
    let mut resume: Option<UploadedResume> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        match field.name() {
            Some("target_role") => {
                target_role = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid target_role field: {e}")))?;
            }
            Some("resume") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                resume = Some(UploadedResume {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let target_role = target_role.trim().to_string();
    if target_role.is_empty() {
        return Err(AppError::Validation(
            "Please provide a target role".to_string(),
        ));
    }
    let upload = resume.ok_or_else(|| AppError::Validation("Please upload a resume".to_string()))?;
    if upload.data.is_empty() {
        return Err(AppError::Validation(
            "The uploaded resume is empty".to_string(),
        ));
    }

    info!(
        session = %id,
        role = %target_role,
        file = %upload.filename,
        size = upload.data.len(),
        "Analysis submitted"
    );

    state.sessions.begin(id).await?;

    match run_analysis(&state, &upload, &target_role).await {
        Ok(results) => {
            info!(session = %id, score = results.match_score, "Analysis complete");
            state.sessions.complete(id, results.clone()).await;
            Ok(with_session_cookie(
                Json(SessionPhase::Reported(results)).into_response(),
                id,
            ))
        }
        Err(e) => {
            state.sessions.reset(id).await;
            Err(e)
        }
    }
}

/// POST /api/v1/reset
///
/// Discards the session's report and returns it to idle.
pub async fn handle_reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let id = session_id_from_headers(&headers).unwrap_or_else(Uuid::new_v4);
    state.sessions.reset(id).await;
    with_session_cookie(Json(SessionPhase::Idle).into_response(), id)
}

async fn run_analysis(
    state: &AppState,
    upload: &UploadedResume,
    target_role: &str,
) -> Result<analysis::AnalysisResult, AppError> {
    let text = extract::extract_text(
        &state.config,
        &upload.filename,
        upload.content_type.as_deref(),
        &upload.data,
    )
    .await
    .map_err(|e| AppError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    analysis::analyze(&state.llm, &text, target_role, state.config.max_resume_chars).await
}

fn with_session_cookie(mut response: Response, id: Uuid) -> Response {
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&session_cookie(id)).expect("session cookie is a valid header value"),
    );
    response
}
