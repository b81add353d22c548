use serde::{Deserialize, Serialize};

/// Answer clip published to the transcription service
#[derive(Debug, Serialize, Deserialize)]
pub struct ClipMessage {
    pub session_id: String,
    pub question_index: usize,
    pub audio: String, // Base64-encoded clip bytes
    pub mime_type: String,
    pub timestamp: String, // RFC3339 timestamp
}

/// Transcript message received from the transcription service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub session_id: String,
    pub question_index: usize,
    pub text: String,
    pub partial: bool,
    pub timestamp: String,
    pub confidence: Option<f32>,
}

/// Batch analysis request sent to the scoring service
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisRequestMessage {
    pub session_id: String,
    pub company: String,
    pub question_count: usize,
    /// Rendered "Qn: ... / An: ..." transcript
    pub transcript: String,
    pub timestamp: String,
}
