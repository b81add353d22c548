//! Transcript-line representation
//!
//! The paired question/answer rendering submitted for scoring:
//!
//! ```text
//! Q1: Describe a time when you used data to make a decision.
//! A1: I led a migration project and we measured everything.
//! ```
//!
//! `render_transcript` and `parse_transcript` round-trip exactly,
//! preserving question order and text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Transcript placeholder for an answer whose clip produced no audio
pub const NO_SPEECH_MARKER: &str = "[No speech detected]";

/// Transcript placeholder for an answer whose transcription failed
pub const TRANSCRIPTION_FAILED_MARKER: &str = "[Transcription failed]";

/// One question/answer pair, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub question_number: usize,
    pub question: String,
    pub answer: String,
}

impl TranscriptLine {
    pub fn new(
        question_number: usize,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question_number,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Whether the answer is a placeholder rather than spoken text
    pub fn is_placeholder(&self) -> bool {
        self.answer == NO_SPEECH_MARKER || self.answer == TRANSCRIPTION_FAILED_MARKER
    }
}

/// Render transcript lines to the "Qn: ... / An: ..." text form
pub fn render_transcript(lines: &[TranscriptLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!("Q{}: {}\n", line.question_number, line.question));
        out.push_str(&format!("A{}: {}\n", line.question_number, line.answer));
    }
    out
}

static QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q(\d+):\s*(.*)$").expect("question line regex"));
static ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^A(\d+):\s*(.*)$").expect("answer line regex"));

/// Parse the text form back into transcript lines.
///
/// Lines that do not form a Qn/An pair are skipped.
pub fn parse_transcript(text: &str) -> Vec<TranscriptLine> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut pairs = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        let (Some(q), Some(a)) = (QUESTION_RE.captures(lines[i]), ANSWER_RE.captures(lines[i + 1]))
        else {
            i += 1;
            continue;
        };

        let question_number = q[1].parse().unwrap_or(pairs.len() + 1);
        pairs.push(TranscriptLine {
            question_number,
            question: q[2].to_string(),
            answer: a[2].to_string(),
        });
        i += 2;
    }

    pairs
}
