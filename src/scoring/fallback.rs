//! Deterministic local fallback scorer
//!
//! Pure text heuristics, no I/O: a filler-word regex count, a
//! word-count-based speaking rate, and keyword-based STAR detection.
//! Produces the same `AnalysisResult` shape as the remote provider so the
//! session completes with best-effort feedback whenever scoring is
//! unavailable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{
    AnalysisResult, Decision, OverallMetrics, QuestionAnalysis, Scoring, ScoringError,
};
use crate::transcript::TranscriptLine;

static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(um+|uh+|like|you know|basically|actually)\b").expect("filler word regex")
});

const STAR_KEYWORDS: &[&str] = &[
    "situation",
    "task",
    "action",
    "result",
    "challenge",
    "problem",
    "solution",
    "outcome",
];

/// Pass thresholds for the fallback decision
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    /// Maximum acceptable total filler words
    pub max_filler_words: u32,
    /// Minimum acceptable speaking rate (WPM)
    pub min_wpm: u32,
    /// Maximum acceptable speaking rate (WPM)
    pub max_wpm: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_filler_words: 10,
            min_wpm: 100,
            max_wpm: 200,
        }
    }
}

fn filler_matches(text: &str) -> Vec<String> {
    FILLER_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Word-count-based speaking rate.
///
/// Without clip durations the rate is estimated against a nominal
/// 150 WPM reading pace, clamped to at least one minute of speech.
fn speaking_rate_wpm(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    let minutes = (words as f64 / 150.0).max(1.0);
    (words as f64 / minutes).round() as u32
}

fn has_star_structure(text: &str) -> bool {
    let lower = text.to_lowercase();
    STAR_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn analyze_question(line: &TranscriptLine) -> QuestionAnalysis {
    if line.is_placeholder() || line.answer.trim().is_empty() {
        let feedback = if line.answer == crate::transcript::NO_SPEECH_MARKER {
            "No speech was detected for this answer.".to_string()
        } else {
            "Transcription was unavailable for this answer.".to_string()
        };

        return QuestionAnalysis {
            question_number: line.question_number,
            question: line.question.clone(),
            answer: line.answer.clone(),
            star_method: false,
            filler_words: 0,
            filler_words_list: Vec::new(),
            speaking_rate_wpm: 0,
            feedback,
        };
    }

    let fillers = filler_matches(&line.answer);
    let star = has_star_structure(&line.answer);

    let mut feedback = if star {
        "Good use of structured response with specific examples".to_string()
    } else {
        "Consider using the STAR method (Situation, Task, Action, Result) for more structured answers"
            .to_string()
    };
    if fillers.len() > 3 {
        feedback.push_str(". Try to reduce filler words");
    }

    QuestionAnalysis {
        question_number: line.question_number,
        question: line.question.clone(),
        answer: line.answer.clone(),
        star_method: star,
        filler_words: fillers.len() as u32,
        filler_words_list: fillers,
        speaking_rate_wpm: speaking_rate_wpm(&line.answer),
        feedback,
    }
}

/// Score a full transcript deterministically.
///
/// Placeholder answers (no speech, failed transcription) are excluded
/// from the overall text metrics but still receive aligned per-question
/// entries.
pub fn score(lines: &[TranscriptLine], thresholds: &Thresholds) -> AnalysisResult {
    let question_analysis: Vec<QuestionAnalysis> = lines.iter().map(analyze_question).collect();

    let answers_text = lines
        .iter()
        .filter(|l| !l.is_placeholder() && !l.answer.trim().is_empty())
        .map(|l| l.answer.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if answers_text.trim().is_empty() {
        return AnalysisResult {
            summary: "We could not detect clear spoken answers from the transcript. \
                      Please ensure your microphone permissions are granted and try again."
                .to_string(),
            metrics: OverallMetrics {
                filler_words: 0,
                speaking_rate_wpm: 0,
            },
            decision: Decision {
                pass: false,
                rationale: "Insufficient transcript to evaluate.".to_string(),
            },
            question_analysis,
        };
    }

    let filler_words = filler_matches(&answers_text).len() as u32;
    let wpm = speaking_rate_wpm(&answers_text);
    let star = has_star_structure(&answers_text);

    let pass = filler_words <= thresholds.max_filler_words
        && wpm >= thresholds.min_wpm
        && wpm <= thresholds.max_wpm
        && star;

    let rationale = if pass {
        "Meets baseline performance standards".to_string()
    } else {
        "Falls below one or more thresholds (filler words, speaking rate, structure)".to_string()
    };

    AnalysisResult {
        summary: "Analysis completed using the built-in heuristic scorer; \
                  connect a scoring provider for deeper feedback."
            .to_string(),
        metrics: OverallMetrics {
            filler_words,
            speaking_rate_wpm: wpm,
        },
        decision: Decision { pass, rationale },
        question_analysis,
    }
}

/// The fallback scorer behind the `Scoring` port, for running fully
/// offline.
pub struct LocalScoring {
    thresholds: Thresholds,
}

impl LocalScoring {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for LocalScoring {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[async_trait::async_trait]
impl Scoring for LocalScoring {
    async fn analyze(
        &self,
        lines: &[TranscriptLine],
        _company: &str,
        _question_count: usize,
    ) -> Result<AnalysisResult, ScoringError> {
        Ok(score(lines, &self.thresholds))
    }
}
