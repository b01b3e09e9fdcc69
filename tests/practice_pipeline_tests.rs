// Integration tests for the generative practice pipeline
//
// Tests cover:
// - Content hashing and cache key derivation
// - Question model construction and dedup identity
// - Structured output decoding and bounded-retry degradation
// - Artifact store and content cache contracts

use minerva::cache::artifact_store::{ArtifactStore, FsArtifactStore, MediaKind};
use minerva::cache::content_cache::{ContentCache, InMemoryContentCache};
use minerva::cache::key::{ArtifactKind, cache_key, content_hash};
use minerva::error::AppError;
use minerva::genai::decode::decode_structured;
use minerva::models::attempt::{AttemptLog, WeaknessTopic};
use minerva::models::question::{GeneratedQuestion, PracticeQuestion, QuestionType};

use serde::Deserialize;
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    std::env::temp_dir()
        .join("minerva-integration-tests")
        .join(uuid::Uuid::new_v4().to_string())
}

fn sample_generated(text: &str) -> GeneratedQuestion {
    GeneratedQuestion {
        question: text.to_string(),
        question_type: QuestionType::MultipleChoice,
        topic: "fractions".to_string(),
        difficulty: Some(3),
        choices: Some(vec!["1/2".into(), "1/3".into(), "2/3".into()]),
        answer: "2/3".to_string(),
        explanation: "Add the numerators".to_string(),
        image_prompt: Some("two pie charts".to_string()),
    }
}

// ============ Hashing & keys ============

#[test]
fn test_content_hash_is_stable_and_text_sensitive() {
    let a = content_hash("What is 1/3 + 1/3?");
    let b = content_hash("What is 1/3 + 1/3?");
    let c = content_hash("What is 1/3 + 1/4?");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn test_cache_key_varies_with_every_parameter() {
    let base = cache_key(ArtifactKind::Speech, &["hello", "alloy", "tts-1"]);

    assert_ne!(
        base,
        cache_key(ArtifactKind::Speech, &["hello", "nova", "tts-1"])
    );
    assert_ne!(
        base,
        cache_key(ArtifactKind::Speech, &["hello", "alloy", "tts-2"])
    );
    assert_ne!(
        base,
        cache_key(ArtifactKind::Illustration, &["hello", "alloy", "tts-1"])
    );
    assert_eq!(
        base,
        cache_key(ArtifactKind::Speech, &["hello", "alloy", "tts-1"])
    );
}

// ============ Question model ============

#[test]
fn test_identical_text_yields_identical_dedup_identity() {
    let q1 = PracticeQuestion::from_generated("plan-1", sample_generated("same text"), 2, None);
    let q2 = PracticeQuestion::from_generated("plan-1", sample_generated("same text"), 2, None);

    assert_eq!(q1.content_hash, q2.content_hash);
    assert_ne!(q1.id, q2.id);
}

#[test]
fn test_out_of_band_difficulty_falls_back() {
    let mut generated = sample_generated("q");
    generated.difficulty = Some(9);
    let q = PracticeQuestion::from_generated("plan-1", generated, 2, None);
    assert_eq!(q.difficulty, 2);

    let mut generated = sample_generated("q");
    generated.difficulty = None;
    let q = PracticeQuestion::from_generated("plan-1", generated, 4, None);
    assert_eq!(q.difficulty, 4);
}

// ============ Structured decoding ============

#[derive(Debug, Deserialize, PartialEq)]
struct Verdict {
    is_correct: bool,
}

#[test]
fn test_decode_handles_fenced_and_prose_wrapped_output() {
    let fenced = "```json\n{\"is_correct\": true}\n```";
    let prose = "Sure! Here is the result: {\"is_correct\": false} Hope that helps.";

    assert_eq!(
        decode_structured::<Verdict>(fenced).unwrap(),
        Verdict { is_correct: true }
    );
    assert_eq!(
        decode_structured::<Verdict>(prose).unwrap(),
        Verdict { is_correct: false }
    );
    assert!(decode_structured::<Verdict>("no structure here").is_err());
}

// ============ Cache & store contracts ============

#[tokio::test]
async fn test_in_memory_cache_miss_then_hit() {
    let cache = InMemoryContentCache::new();
    let key = cache_key(ArtifactKind::Illustration, &["a cat", "dall-e-3"]);

    assert!(cache.lookup(&key).await.unwrap().is_none());
    cache.store(&key, "images/cat.png").await.unwrap();
    assert_eq!(
        cache.lookup(&key).await.unwrap().as_deref(),
        Some("images/cat.png")
    );
}

#[tokio::test]
async fn test_artifact_store_rejects_empty_payload() {
    let store = FsArtifactStore::new(temp_dir());
    let err = store.store(&[], MediaKind::Audio).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidArtifact(_)));
}

#[tokio::test]
async fn test_artifact_store_round_trip_reference() {
    let root = temp_dir();
    let store = FsArtifactStore::new(root.clone());

    let reference = store.store(b"png-bytes", MediaKind::Image).await.unwrap();
    assert!(reference.starts_with("images/"));
    assert!(root.join(&reference).exists());

    store.delete(&reference).await.unwrap();
    assert!(!root.join(&reference).exists());
    // idempotent
    store.delete(&reference).await.unwrap();
}

// ============ Attempt aggregation inputs ============

#[test]
fn test_attempt_log_and_weakness_topic_shapes() {
    let log = AttemptLog::new("u1", "p1", "q1", "1/2", false, "Wrong sum", Some("".into()));
    assert!(log.weakness_tag.is_none());

    let topic = WeaknessTopic::from_counts("fractions", 2, 5);
    assert_eq!(topic.wrong_count, 2);
    assert!((topic.error_rate - 0.4).abs() < f64::EPSILON);
}
