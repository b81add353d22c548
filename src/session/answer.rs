use serde::Serialize;

use crate::capture::Clip;
use crate::transcript::{TranscriptLine, TRANSCRIPTION_FAILED_MARKER};

/// One recorded answer.
///
/// Created when recording for its question stops; appended in question
/// order and never mutated after the transcript resolves.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    /// 0-based question index
    pub question_index: usize,
    pub question: String,

    /// The raw clip, owned by the answer until its transcript resolves
    /// or the session is abandoned
    #[serde(skip)]
    pub clip: Option<Clip>,

    /// Captured clip size in bytes
    pub clip_bytes: usize,

    /// Transcript text; written exactly once when transcription resolves
    pub transcript: Option<String>,

    /// Whether transcription for this answer failed
    pub transcription_failed: bool,
}

impl Answer {
    pub fn new(question_index: usize, question: impl Into<String>, clip: Clip) -> Self {
        Self {
            question_index,
            question: question.into(),
            clip_bytes: clip.byte_size(),
            clip: if clip.is_empty() { None } else { Some(clip) },
            transcript: None,
            transcription_failed: false,
        }
    }

    /// Write the transcript field. The write happens exactly once; later
    /// calls are ignored so a resolved answer is never mutated.
    pub fn resolve_transcript(&mut self, text: impl Into<String>, failed: bool) {
        if self.transcript.is_some() {
            return;
        }
        self.transcript = Some(text.into());
        self.transcription_failed = failed;
    }

    pub fn is_resolved(&self) -> bool {
        self.transcript.is_some()
    }

    /// Drop the clip buffer
    pub fn release_clip(&mut self) {
        self.clip = None;
    }
}

/// Build the ordered transcript lines for scoring from the answer list.
///
/// Unresolved transcripts get the failure placeholder so the rendered
/// transcript always covers every answered question.
pub fn build_transcript_lines(answers: &[Answer]) -> Vec<TranscriptLine> {
    answers
        .iter()
        .map(|a| {
            TranscriptLine::new(
                a.question_index + 1,
                a.question.clone(),
                a.transcript
                    .clone()
                    .unwrap_or_else(|| TRANSCRIPTION_FAILED_MARKER.to_string()),
            )
        })
        .collect()
}
