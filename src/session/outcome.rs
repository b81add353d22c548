use chrono::{DateTime, Utc};
use serde::Serialize;

use super::answer::Answer;
use super::phase::Phase;
use crate::scoring::Score;

/// Session metadata included in status and terminal payloads
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub company: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
}

/// The terminal payload emitted when a session completes, fails, or is
/// cancelled
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session: SessionSummary,
    /// All collected answers, in question order
    pub answers: Vec<Answer>,
    /// Present for completed sessions; absent when cancelled or failed
    pub analysis: Option<Score>,
}

/// A point-in-time view of a running session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub company: String,
    pub phase: Phase,
    /// 0-based index of the current question
    pub question_index: usize,
    pub question_count: usize,
    pub answers_collected: usize,
    /// Elapsed recording time for the current answer, while recording
    pub recording_elapsed_secs: Option<f64>,
    /// Display line for the current phase
    pub status_text: &'static str,
    pub created_at: DateTime<Utc>,
}

/// Result of a stop-recording command
#[derive(Debug)]
pub enum StopOutcome {
    /// More questions remain; the session is idle awaiting the next ask
    NextQuestion { question_index: usize },
    /// That was the last question; the session ran to a terminal phase
    Finished(Box<SessionOutcome>),
}
