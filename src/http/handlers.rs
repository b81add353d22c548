use super::state::{AppState, SessionEntry};
use crate::capture::AudioFrame;
use crate::questions::QuestionSet;
use crate::session::{InterviewSession, SessionStateError, StopOutcome};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    /// Company persona selecting a built-in question bank
    pub company: String,

    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Custom questions overriding the built-in bank
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub company: String,
    pub question_count: usize,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct NextQuestionResponse {
    pub session_id: String,
    pub status: String,
    pub next_question_index: usize,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct FramePayload {
    /// Base64-encoded i16 PCM samples
    pub pcm: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub timestamp_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn not_found(session_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Interview {} not found", session_id),
        }),
    )
        .into_response()
}

fn rejected(e: SessionStateError) -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

async fn lookup(state: &AppState, session_id: &str) -> Option<SessionEntry> {
    state.sessions.read().await.get(session_id).cloned()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /interviews/start
/// Create a new interview session
pub async fn start_interview(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("interview-{}", uuid::Uuid::new_v4()));

    info!("Starting interview {} for {}", session_id, req.company);

    // Check for an existing session with the same id
    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Interview {} already exists", session_id),
                }),
            )
                .into_response();
        }
    }

    let question_set = match req.questions {
        Some(questions) => QuestionSet::new(req.company.clone(), questions),
        None => match QuestionSet::builtin(&req.company) {
            Some(set) => set,
            None => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: format!("No question bank for company {}", req.company),
                    }),
                )
                    .into_response();
            }
        },
    };

    let (adapters, frames) = match state.build_adapters(&session_id).await {
        Ok(built) => built,
        Err(e) => {
            error!("Failed to build session adapters: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to build session adapters: {}", e),
                }),
            )
                .into_response();
        }
    };

    let config = state.config.session_config(session_id.clone());
    let session = match InterviewSession::new(config, question_set, adapters) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create session: {:#}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to create session: {}", e),
                }),
            )
                .into_response();
        }
    };

    let status = session.status().await;

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), SessionEntry { session, frames });
    }

    info!("Interview {} created", session_id);

    (
        StatusCode::OK,
        Json(StartInterviewResponse {
            session_id: session_id.clone(),
            company: status.company,
            question_count: status.question_count,
            status: "created".to_string(),
            message: format!("Interview {} ready; ask the first question", session_id),
        }),
    )
        .into_response()
}

/// POST /interviews/:session_id/ask
/// Ask the current question
pub async fn ask_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    match entry.session.ask_current_question() {
        Ok(()) => (StatusCode::OK, Json(entry.session.status().await)).into_response(),
        Err(e) => rejected(e),
    }
}

/// POST /interviews/:session_id/skip
/// Skip the thinking countdown
pub async fn skip_thinking(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    match entry.session.skip_thinking() {
        Ok(()) => (StatusCode::OK, Json(entry.session.status().await)).into_response(),
        Err(e) => rejected(e),
    }
}

/// POST /interviews/:session_id/stop
/// Stop recording the current answer
pub async fn stop_recording(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    match entry.session.stop_recording().await {
        Ok(StopOutcome::NextQuestion { question_index }) => {
            let question = entry
                .session
                .current_question()
                .unwrap_or_default()
                .to_string();

            (
                StatusCode::OK,
                Json(NextQuestionResponse {
                    session_id,
                    status: "awaiting_question".to_string(),
                    next_question_index: question_index,
                    question,
                }),
            )
                .into_response()
        }
        Ok(StopOutcome::Finished(outcome)) => (StatusCode::OK, Json(*outcome)).into_response(),
        Err(e) => rejected(e),
    }
}

/// POST /interviews/:session_id/cancel
/// Cancel the session
pub async fn cancel_interview(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    match entry.session.cancel().await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => rejected(e),
    }
}

/// POST /interviews/:session_id/frames
/// Push captured audio frames into the session's capture channel
pub async fn push_frames(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<FramePayload>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    let pcm_bytes = match base64::engine::general_purpose::STANDARD.decode(&payload.pcm) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 PCM payload: {}", e),
                }),
            )
                .into_response();
        }
    };

    let samples: Vec<i16> = pcm_bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    let frame = AudioFrame {
        samples,
        sample_rate: payload.sample_rate,
        channels: payload.channels,
        timestamp_ms: payload.timestamp_ms,
    };

    match entry.frames.send(frame).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Capture channel closed; session has released its device".to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /interviews/:session_id/status
/// Get status of an interview session
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    (StatusCode::OK, Json(entry.session.status().await)).into_response()
}

/// GET /interviews/:session_id/result
/// Get the terminal payload of a finished session
pub async fn get_result(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(entry) = lookup(&state, &session_id).await else {
        return not_found(&session_id);
    };

    match entry.session.outcome().await {
        Some(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Interview {} has not finished", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /companies
/// List built-in question banks
pub async fn list_companies() -> impl IntoResponse {
    (StatusCode::OK, Json(QuestionSet::companies()))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
