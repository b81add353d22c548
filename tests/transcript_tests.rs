// Tests for the transcript-line rendering and parsing
//
// The "Qn: / An:" text form is what the scoring provider receives; it
// must round-trip exactly, preserving question order and text.

use greenroom::{
    parse_transcript, render_transcript, TranscriptLine, NO_SPEECH_MARKER,
    TRANSCRIPTION_FAILED_MARKER,
};

#[test]
fn test_render_format() {
    let lines = vec![
        TranscriptLine::new(1, "First question?", "First answer"),
        TranscriptLine::new(2, "Second question?", "Second answer"),
    ];

    let text = render_transcript(&lines);

    assert_eq!(
        text,
        "Q1: First question?\nA1: First answer\nQ2: Second question?\nA2: Second answer\n"
    );
}

#[test]
fn test_round_trip_preserves_order_and_text() {
    let lines = vec![
        TranscriptLine::new(1, "Describe a time you used data.", "I measured everything"),
        TranscriptLine::new(2, "How do you prioritize?", "I rank by impact"),
        TranscriptLine::new(3, "Final question?", TRANSCRIPTION_FAILED_MARKER),
    ];

    let parsed = parse_transcript(&render_transcript(&lines));

    assert_eq!(parsed, lines);
}

#[test]
fn test_parse_example_transcript() {
    let text = "Q1: Tell me about yourself.\nA1: I am an engineer\nQ2: Why this company?\nA2: I admire the product";

    let parsed = parse_transcript(text);

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].question_number, 1);
    assert_eq!(parsed[0].question, "Tell me about yourself.");
    assert_eq!(parsed[0].answer, "I am an engineer");
    assert_eq!(parsed[1].question_number, 2);
    assert_eq!(parsed[1].answer, "I admire the product");
}

#[test]
fn test_parse_skips_blank_and_junk_lines() {
    let text = "\nsome header\nQ1: Question?\nA1: Answer\n\nnot a pair\n";

    let parsed = parse_transcript(text);

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].question, "Question?");
}

#[test]
fn test_parse_keeps_original_question_numbers() {
    let text = "Q7: Late question?\nA7: Late answer";

    let parsed = parse_transcript(text);

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].question_number, 7);
}

#[test]
fn test_parse_empty_input() {
    assert!(parse_transcript("").is_empty());
    assert!(parse_transcript("\n\n").is_empty());
}

#[test]
fn test_placeholder_detection() {
    let no_speech = TranscriptLine::new(1, "Q?", NO_SPEECH_MARKER);
    let failed = TranscriptLine::new(2, "Q?", TRANSCRIPTION_FAILED_MARKER);
    let spoken = TranscriptLine::new(3, "Q?", "A real answer");

    assert!(no_speech.is_placeholder());
    assert!(failed.is_placeholder());
    assert!(!spoken.is_placeholder());
}
