//! Scoring port
//!
//! Submits the full session transcript to a scoring engine and returns
//! structured per-question feedback. When the provider is unavailable or
//! returns a malformed response, the orchestrator falls back to the
//! deterministic local scorer in [`fallback`].

pub mod fallback;
mod nats;

pub use fallback::{LocalScoring, Thresholds};
pub use nats::NatsScoring;

use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptLine;

/// Batch analysis errors
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring provider unreachable: {0}")]
    Provider(String),
    #[error("invalid analysis response: {0}")]
    InvalidResponse(String),
}

/// Scoring port
#[async_trait::async_trait]
pub trait Scoring: Send + Sync {
    async fn analyze(
        &self,
        lines: &[TranscriptLine],
        company: &str,
        question_count: usize,
    ) -> Result<AnalysisResult, ScoringError>;
}

/// Session-level metrics aggregated across all answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallMetrics {
    /// Total filler words across all answers
    pub filler_words: u32,
    /// Average speaking rate in words per minute
    pub speaking_rate_wpm: u32,
}

/// Pass/fail decision with rationale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub pass: bool,
    pub rationale: String,
}

/// Feedback for a single question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub question_number: usize,
    pub question: String,
    pub answer: String,
    /// Whether the answer shows STAR-method structure
    pub star_method: bool,
    pub filler_words: u32,
    pub filler_words_list: Vec<String>,
    pub speaking_rate_wpm: u32,
    pub feedback: String,
}

/// The aggregated result of scoring one session.
///
/// Immutable once produced; per-question analyses are ordered and aligned
/// by question index with the session's Answer list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub metrics: OverallMetrics,
    pub decision: Decision,
    pub question_analysis: Vec<QuestionAnalysis>,
}

impl AnalysisResult {
    /// Check that the per-question analyses line up with the session's
    /// question count and ordering.
    pub fn validate(&self, question_count: usize) -> Result<(), String> {
        if self.question_analysis.len() != question_count {
            return Err(format!(
                "expected {} question analyses, got {}",
                question_count,
                self.question_analysis.len()
            ));
        }

        for (i, qa) in self.question_analysis.iter().enumerate() {
            if qa.question_number != i + 1 {
                return Err(format!(
                    "question analysis {} out of order (question_number={})",
                    i, qa.question_number
                ));
            }
        }

        Ok(())
    }
}

/// An analysis result tagged with the path that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", content = "analysis", rename_all = "snake_case")]
pub enum Score {
    /// Produced by the scoring provider
    Remote(AnalysisResult),
    /// Produced by the local heuristic fallback
    Fallback(AnalysisResult),
}

impl Score {
    pub fn analysis(&self) -> &AnalysisResult {
        match self {
            Score::Remote(a) | Score::Fallback(a) => a,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Score::Fallback(_))
    }
}
