//! Round trips against a real PostgreSQL instance. Run with
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use api_lib::{adapters::db::DbAdapter, config::DatabaseSettings};
use flashcard_core::{DatabaseService, Difficulty, NewFlashcard};

fn adapter() -> DbAdapter {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    DbAdapter::connect_lazy(&DatabaseSettings::Url(url), 2).unwrap()
}

#[tokio::test]
#[ignore]
async fn flashcard_round_trip() {
    let db = adapter();
    db.initialize().await.unwrap();
    db.initialize().await.unwrap();

    let topic = format!("roundtrip-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap());
    let id = db
        .save_flashcard(NewFlashcard::new("What is ATP?", "Energy currency", Some(&topic), Difficulty::Hard))
        .await
        .unwrap();

    let cards = db.get_all_flashcards(Some(&topic)).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, id);
    assert_eq!(cards[0].question, "What is ATP?");
    assert_eq!(cards[0].answer, "Energy currency");
    assert_eq!(cards[0].topic, topic);
    assert_eq!(cards[0].difficulty, Difficulty::Hard);
}

#[tokio::test]
#[ignore]
async fn newest_flashcards_come_first_and_sessions_get_ids() {
    let db = adapter();
    db.initialize().await.unwrap();

    let topic = format!("ordering-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap());
    let first = db
        .save_flashcard(NewFlashcard::new("one", "1", Some(&topic), Difficulty::Easy))
        .await
        .unwrap();
    let second = db
        .save_flashcard(NewFlashcard::new("two", "2", Some(&topic), Difficulty::Easy))
        .await
        .unwrap();
    assert!(second > first);

    let ids: Vec<i64> = db
        .get_all_flashcards(Some(&topic))
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, [second, first]);

    let a = db.save_study_session("Session - General", "notes").await.unwrap();
    let b = db.save_study_session("Session - General", "notes").await.unwrap();
    assert!(b > a);
}
