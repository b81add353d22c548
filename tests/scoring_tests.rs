// Tests for the deterministic fallback scorer and the analysis schema
//
// The fallback must produce the same result for the same answers, and
// its pass decision follows the configured thresholds exactly.

use greenroom::scoring::{fallback, AnalysisResult, Decision, OverallMetrics, Score, Thresholds};
use greenroom::{TranscriptLine, NO_SPEECH_MARKER, TRANSCRIPTION_FAILED_MARKER};

fn line(n: usize, question: &str, answer: &str) -> TranscriptLine {
    TranscriptLine::new(n, question, answer)
}

/// A filler-free answer with STAR keywords, padded to the given word
/// count so the estimated speaking rate lands inside the pass band
fn structured_answer(words: usize) -> String {
    let base = "The situation was difficult and the result was strong";
    let base_words = base.split_whitespace().count();
    let mut answer = base.to_string();
    for _ in base_words..words {
        answer.push_str(" then");
    }
    answer
}

#[test]
fn test_pass_with_structured_answer_and_good_pace() {
    let lines = vec![line(1, "Tell me about a challenge.", &structured_answer(120))];

    let result = fallback::score(&lines, &Thresholds::default());

    assert_eq!(result.metrics.filler_words, 0);
    assert_eq!(result.metrics.speaking_rate_wpm, 120);
    assert!(result.decision.pass, "rationale: {}", result.decision.rationale);
    assert_eq!(result.question_analysis.len(), 1);
    assert!(result.question_analysis[0].star_method);
}

#[test]
fn test_fail_on_filler_words() {
    let mut answer = structured_answer(110);
    for _ in 0..11 {
        answer.push_str(" um");
    }
    let lines = vec![line(1, "Q?", &answer)];

    let result = fallback::score(&lines, &Thresholds::default());

    assert_eq!(result.metrics.filler_words, 11);
    assert!(!result.decision.pass);
}

#[test]
fn test_fail_on_low_speaking_rate() {
    // 9 words reads as 9 WPM under the one-minute floor
    let lines = vec![line(1, "Q?", "The situation was fine and the result was ok")];

    let result = fallback::score(&lines, &Thresholds::default());

    assert!(result.metrics.speaking_rate_wpm < 100);
    assert!(!result.decision.pass);
}

#[test]
fn test_fail_without_star_structure() {
    let mut answer = String::from("It went well");
    for _ in 0..117 {
        answer.push_str(" then");
    }
    let lines = vec![line(1, "Q?", &answer)];

    let result = fallback::score(&lines, &Thresholds::default());

    assert!(!result.question_analysis[0].star_method);
    assert!(!result.decision.pass);
}

#[test]
fn test_speaking_rate_is_capped_by_nominal_pace() {
    // 300 words over an estimated two minutes: 150 WPM
    let answer = vec!["word"; 300].join(" ");
    let lines = vec![line(1, "Q?", &answer)];

    let result = fallback::score(&lines, &Thresholds::default());

    assert_eq!(result.question_analysis[0].speaking_rate_wpm, 150);
}

#[test]
fn test_filler_matching_is_case_insensitive() {
    let lines = vec![line(1, "Q?", "Um UM uh LIKE you know the answer")];

    let result = fallback::score(&lines, &Thresholds::default());

    assert_eq!(result.metrics.filler_words, 5);
    let qa = &result.question_analysis[0];
    assert_eq!(qa.filler_words, 5);
    assert!(qa.filler_words_list.contains(&"um".to_string()));
    assert!(qa.filler_words_list.contains(&"you know".to_string()));
}

#[test]
fn test_placeholder_answers_excluded_from_metrics() {
    let lines = vec![
        line(1, "First?", &structured_answer(120)),
        line(2, "Second?", TRANSCRIPTION_FAILED_MARKER),
    ];

    let result = fallback::score(&lines, &Thresholds::default());

    // Metrics computed from the usable answer only
    assert_eq!(result.metrics.speaking_rate_wpm, 120);
    assert_eq!(result.question_analysis.len(), 2);

    let failed = &result.question_analysis[1];
    assert_eq!(failed.filler_words, 0);
    assert_eq!(failed.speaking_rate_wpm, 0);
    assert!(!failed.star_method);
    assert!(failed.feedback.contains("unavailable"));
}

#[test]
fn test_no_speech_placeholder_gets_distinct_feedback() {
    let lines = vec![
        line(1, "First?", &structured_answer(120)),
        line(2, "Second?", NO_SPEECH_MARKER),
    ];

    let result = fallback::score(&lines, &Thresholds::default());

    assert!(result.question_analysis[1].feedback.contains("No speech"));
}

#[test]
fn test_no_usable_answers_yields_insufficient_result() {
    let lines = vec![
        line(1, "First?", NO_SPEECH_MARKER),
        line(2, "Second?", TRANSCRIPTION_FAILED_MARKER),
    ];

    let result = fallback::score(&lines, &Thresholds::default());

    assert!(result.summary.contains("could not detect"));
    assert!(!result.decision.pass);
    assert_eq!(result.metrics.filler_words, 0);
    assert_eq!(result.metrics.speaking_rate_wpm, 0);
    // Per-question entries stay aligned with the question count
    assert_eq!(result.question_analysis.len(), 2);
}

#[test]
fn test_scoring_is_deterministic() {
    let lines = vec![
        line(1, "First?", "I led a team project um and it went well"),
        line(2, "Second?", TRANSCRIPTION_FAILED_MARKER),
    ];

    let first = fallback::score(&lines, &Thresholds::default());
    let second = fallback::score(&lines, &Thresholds::default());

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert!(first.question_analysis[0].filler_words >= 1);
}

#[test]
fn test_custom_thresholds_change_decision() {
    let lines = vec![line(1, "Q?", &structured_answer(120))];

    let strict = Thresholds {
        max_filler_words: 10,
        min_wpm: 150,
        max_wpm: 200,
    };

    let result = fallback::score(&lines, &strict);
    assert!(!result.decision.pass, "120 WPM is below the strict minimum");
}

#[test]
fn test_validate_rejects_count_mismatch() {
    let result = fallback::score(
        &[line(1, "Q?", &structured_answer(110))],
        &Thresholds::default(),
    );

    assert!(result.validate(1).is_ok());
    assert!(result.validate(2).is_err());
}

#[test]
fn test_validate_rejects_out_of_order_analyses() {
    let result = AnalysisResult {
        summary: "s".to_string(),
        metrics: OverallMetrics {
            filler_words: 0,
            speaking_rate_wpm: 0,
        },
        decision: Decision {
            pass: false,
            rationale: "r".to_string(),
        },
        question_analysis: vec![
            fallback::score(&[line(2, "Q?", "a")], &Thresholds::default()).question_analysis[0]
                .clone(),
        ],
    };

    // Single entry claiming question_number 2
    assert!(result.validate(1).is_err());
}

#[test]
fn test_score_tagging_round_trips() {
    let result = fallback::score(
        &[line(1, "Q?", &structured_answer(110))],
        &Thresholds::default(),
    );

    let fallback_score = Score::Fallback(result.clone());
    let value = serde_json::to_value(&fallback_score).unwrap();
    assert_eq!(value["source"], "fallback");
    assert!(value["analysis"]["summary"].is_string());

    let remote_score = Score::Remote(result);
    let value = serde_json::to_value(&remote_score).unwrap();
    assert_eq!(value["source"], "remote");
    assert!(!remote_score.is_fallback());
}
