//! NATS transport for the transcription and scoring providers
//!
//! Clips are published per answer and transcripts received on a shared
//! text subject; analysis is a single request/reply exchange at session
//! end.

pub mod client;
pub mod messages;

pub use client::NatsClient;
pub use messages::{AnalysisRequestMessage, ClipMessage, TranscriptMessage};
