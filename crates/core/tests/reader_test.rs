//! End-to-end tests for the reader session: recognition, segmentation
//! pre-pass, grouping and the serialized response.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use fukidashi_core::api::{ReaderSession, Recognizer, prepare_detections, read_detections};
use fukidashi_core::error::{ReadError, Result};
use fukidashi_core::layout::GroupingParams;
use fukidashi_core::model::{Paragraph, RawDetection, parse_detections};
use fukidashi_core::segment::DictionarySegmenter;

/// Recognizer that treats the "image" as a recorded engine response.
struct RecordedEngine {
    calls: Arc<AtomicUsize>,
}

impl Recognizer for RecordedEngine {
    fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let json = std::str::from_utf8(image).map_err(|e| ReadError::Recognition(e.to_string()))?;
        parse_detections(json)
    }
}

const PAGE: &str = r#"[
    [[[0, 0], [10, 0], [10, 10], [0, 10]], "A", 0.9],
    [[[12, 0], [22, 0], [22, 10], [12, 10]], "B", 0.8],
    [[[200, 0], [260, 0], [260, 12], [200, 12]], "HELLOWORLD", 0.7]
]"#;

fn read_paragraphs(session: &ReaderSession) -> Vec<Paragraph> {
    session.read_text(PAGE.as_bytes()).unwrap().paragraphs
}

fn dictionary() -> DictionarySegmenter {
    DictionarySegmenter::from_words(["the", "hello", "world", "a", "b"])
}

#[test]
fn test_session_reads_recorded_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let session = ReaderSession::builder(RecordedEngine {
        calls: calls.clone(),
    })
    .segmenter(dictionary())
    .open()
    .unwrap();

    let response = session.read_text(PAGE.as_bytes()).unwrap();

    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(response.stats.total_lines, 3);
    assert_eq!(response.stats.total_paragraphs, 2);
    assert_eq!(response.stats.image_size, Some(PAGE.len()));
    let texts: Vec<_> = response
        .paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(texts, vec!["B A", "HELLO WORLD"]);
    assert_eq!(response.results[2].text, "HELLO WORLD");
}

#[test]
fn test_segmentation_keeps_detection_single() {
    let raw = parse_detections(
        r#"[{"bbox": [[0,0],[100,0],[100,20],[0,20]], "text": "HELLOWORLD", "score": 0.95}]"#,
    )
    .unwrap();
    let seg = dictionary();

    let dets = prepare_detections(raw, Some(&seg)).unwrap();

    assert_eq!(dets.len(), 1);
    assert_eq!(dets[0].text, "HELLO WORLD");
    assert_eq!(dets[0].score, 0.95);
}

#[test]
fn test_text_with_spaces_is_not_segmented() {
    let raw = vec![RawDetection::new(
        vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 10.0],
        ],
        "HELLOWORLD again",
        0.5,
    )];
    let seg = dictionary();
    let response = read_detections(raw, Some(&seg), &GroupingParams::default()).unwrap();
    assert_eq!(response.paragraphs[0].text, "HELLOWORLD again");
}

#[test]
fn test_malformed_page_is_rejected() {
    let session = ReaderSession::builder(RecordedEngine {
        calls: Arc::new(AtomicUsize::new(0)),
    })
    .open()
    .unwrap();

    let three_points = r#"[[[[0,0],[10,0],[10,10]], "A", 0.9]]"#;
    let err = session.read_text(three_points.as_bytes()).unwrap_err();
    assert!(matches!(err, ReadError::InvalidBBox { index: 0, .. }));

    let not_json = session.read_text(b"\x89PNG").unwrap_err();
    assert!(matches!(not_json, ReadError::Recognition(_)));
}

#[test]
fn test_empty_page_reports_no_text() {
    let blank = |_: &[u8]| -> Result<Vec<RawDetection>> { Ok(Vec::new()) };
    let session = ReaderSession::builder(blank).open().unwrap();
    let response = session.read_text(b"blank").unwrap();
    assert!(response.paragraphs.is_empty());
    assert_eq!(
        response.message.as_deref(),
        Some("No text detected in image")
    );
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_session_types_are_send_and_sync() {
    assert_send_sync::<ReaderSession>();
    assert_send_sync::<DictionarySegmenter>();
}

#[test]
fn test_session_shared_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let session = ReaderSession::builder(RecordedEngine {
        calls: calls.clone(),
    })
    .segmenter(dictionary())
    .open()
    .unwrap();

    let expected = read_paragraphs(&session);

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| read_paragraphs(&session)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(calls.load(Ordering::Relaxed), 5);
}

#[test]
fn test_response_serializes_for_the_wire() {
    let raw = parse_detections(PAGE).unwrap();
    let response = read_detections(raw, None, &GroupingParams::default()).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "success");
    assert_eq!(json["paragraphs"][0]["text"], "B A");
    assert_eq!(json["paragraphs"][0]["item_count"], 2);
    assert_eq!(
        json["paragraphs"][0]["bbox"],
        serde_json::json!([[0.0, 0.0], [22.0, 0.0], [22.0, 10.0], [0.0, 10.0]])
    );
    let elapsed = json["stats"]["processing_time"].as_str().unwrap();
    assert!(elapsed.ends_with('s'));
}
