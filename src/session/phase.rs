use serde::{Deserialize, Serialize};

/// Session lifecycle phase.
///
/// The phase moves forward only:
/// `Idle → AskingQuestion → Thinking → Recording → Processing`, looping
/// back to `Idle` while questions remain, then
/// `Transcribing → Analyzing → Complete`. `Cancelled` is reachable from
/// any non-terminal phase; `Failed` only from `Analyzing` when no answers
/// were collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    AskingQuestion = 1,
    Thinking = 2,
    Recording = 3,
    Processing = 4,
    Transcribing = 5,
    Analyzing = 6,
    Complete = 7,
    Cancelled = 8,
    Failed = 9,
}

impl Phase {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Phase::Idle,
            1 => Phase::AskingQuestion,
            2 => Phase::Thinking,
            3 => Phase::Recording,
            4 => Phase::Processing,
            5 => Phase::Transcribing,
            6 => Phase::Analyzing,
            7 => Phase::Complete,
            8 => Phase::Cancelled,
            _ => Phase::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Complete | Phase::Cancelled | Phase::Failed)
    }

    /// User-facing status line for this phase
    pub fn status_text(self) -> &'static str {
        match self {
            Phase::Idle => "Ask the next question to continue.",
            Phase::AskingQuestion => "Interviewer is asking the question...",
            Phase::Thinking => "Think about your answer...",
            Phase::Recording => "Recording your answer...",
            Phase::Processing => "Processing your answer...",
            Phase::Transcribing => "Transcribing your answers...",
            Phase::Analyzing => "Analyzing your interview...",
            Phase::Complete => "Interview complete.",
            Phase::Cancelled => "Interview cancelled.",
            Phase::Failed => "Interview could not be analyzed.",
        }
    }
}

/// Events published on the session's broadcast stream
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session entered a new phase
    Phase { phase: Phase, question_index: usize },
    /// One second of the thinking countdown elapsed
    ThinkingTick { remaining_secs: u64 },
    /// An answer was stored for a question
    AnswerCaptured {
        question_index: usize,
        clip_bytes: usize,
    },
}

/// A command was rejected without changing session state
#[derive(Debug, thiserror::Error)]
pub enum SessionStateError {
    #[error("command {command:?} is not valid in phase {phase:?}")]
    InvalidCommand {
        command: &'static str,
        phase: Phase,
    },
    #[error("no questions remaining")]
    QuestionsExhausted,
    #[error("session was cancelled")]
    Cancelled,
}
