use base64::Engine;
use greenroom::nats::messages::{AnalysisRequestMessage, ClipMessage, TranscriptMessage};

#[test]
fn test_clip_message_serialization() {
    let msg = ClipMessage {
        session_id: "interview-test".to_string(),
        question_index: 0,
        audio: base64::engine::general_purpose::STANDARD.encode([0u8; 100]),
        mime_type: "audio/wav".to_string(),
        timestamp: "2026-08-07T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("interview-test"));
    assert!(json.contains("audio/wav"));
    assert!(json.contains("\"question_index\":0"));

    let deserialized: ClipMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.session_id, "interview-test");
    assert_eq!(deserialized.question_index, 0);
    assert_eq!(deserialized.mime_type, "audio/wav");
}

#[test]
fn test_transcript_deserialization() {
    let json = r#"{
        "session_id": "interview-test",
        "question_index": 1,
        "text": "Hello world",
        "partial": false,
        "timestamp": "2026-08-07T14:30:05Z",
        "confidence": 0.95
    }"#;

    let msg: TranscriptMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.session_id, "interview-test");
    assert_eq!(msg.question_index, 1);
    assert_eq!(msg.text, "Hello world");
    assert!(!msg.partial);
    assert_eq!(msg.confidence, Some(0.95));
}

#[test]
fn test_transcript_partial_flag() {
    let json = r#"{
        "session_id": "interview-test",
        "question_index": 0,
        "text": "This is a partial",
        "partial": true,
        "timestamp": "2026-08-07T14:30:05Z"
    }"#;

    let msg: TranscriptMessage = serde_json::from_str(json).unwrap();
    assert!(msg.partial);
    assert_eq!(msg.confidence, None);
}

#[test]
fn test_analysis_request_serialization() {
    let msg = AnalysisRequestMessage {
        session_id: "interview-test".to_string(),
        company: "amazon".to_string(),
        question_count: 2,
        transcript: "Q1: First?\nA1: Answer one\nQ2: Second?\nA2: Answer two\n".to_string(),
        timestamp: "2026-08-07T14:31:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: AnalysisRequestMessage = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.company, "amazon");
    assert_eq!(deserialized.question_count, 2);
    assert!(deserialized.transcript.contains("Q2: Second?"));
}

#[test]
fn test_clip_audio_encoding_roundtrip() {
    let original_bytes: Vec<u8> = vec![82, 73, 70, 70, 0, 1, 2, 3];

    let msg = ClipMessage {
        session_id: "interview-test".to_string(),
        question_index: 3,
        audio: base64::engine::general_purpose::STANDARD.encode(&original_bytes),
        mime_type: "audio/wav".to_string(),
        timestamp: "2026-08-07T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: ClipMessage = serde_json::from_str(&json).unwrap();

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&deserialized.audio)
        .unwrap();

    assert_eq!(decoded, original_bytes);
}
