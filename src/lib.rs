pub mod capture;
pub mod config;
pub mod http;
pub mod narration;
pub mod nats;
pub mod questions;
pub mod scoring;
pub mod session;
pub mod transcript;
pub mod transcription;

pub use capture::{AudioFrame, Capture, ChannelCapture, Clip, DeviceError};
pub use config::Config;
pub use http::{create_router, AppState};
pub use narration::{Narration, SilentNarration, SynthesisError};
pub use nats::{AnalysisRequestMessage, ClipMessage, NatsClient, TranscriptMessage};
pub use questions::QuestionSet;
pub use scoring::{
    AnalysisResult, LocalScoring, NatsScoring, Score, Scoring, ScoringError, Thresholds,
};
pub use session::{
    Adapters, Answer, InterviewSession, Phase, SessionConfig, SessionEvent, SessionOutcome,
    SessionStateError, SessionStatus, StopOutcome,
};
pub use transcript::{
    parse_transcript, render_transcript, TranscriptLine, NO_SPEECH_MARKER,
    TRANSCRIPTION_FAILED_MARKER,
};
pub use transcription::{
    NatsTranscription, OfflineTranscription, Transcription, TranscriptionError,
};
