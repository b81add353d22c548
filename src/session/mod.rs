//! Interview session orchestration
//!
//! This module provides the `InterviewSession` state machine that drives
//! one interview from first question to final aggregated result:
//! - Question narration and the thinking countdown
//! - Timed recording capture, one answer per question
//! - Deferred per-clip transcription at session end
//! - Batch scoring with a deterministic local fallback
//! - Terminal payload assembly and capture-device release

mod answer;
mod config;
mod outcome;
mod phase;
mod session;

pub use answer::{build_transcript_lines, Answer};
pub use config::SessionConfig;
pub use outcome::{SessionOutcome, SessionStatus, SessionSummary, StopOutcome};
pub use phase::{Phase, SessionEvent, SessionStateError};
pub use session::{Adapters, InterviewSession};
