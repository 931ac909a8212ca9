use flashcard_core::{DatabaseService, Difficulty, MemoryStore, NewFlashcard};

#[tokio::test]
async fn saved_flashcard_round_trips() {
    let store = MemoryStore::new();
    let card = NewFlashcard::new("What is ATP?", "Energy currency", Some("Biology"), Difficulty::Hard);
    let id = store.save_flashcard(card).await.unwrap();

    let cards = store.get_all_flashcards(Some("Biology")).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, id);
    assert_eq!(cards[0].question, "What is ATP?");
    assert_eq!(cards[0].answer, "Energy currency");
    assert_eq!(cards[0].topic, "Biology");
    assert_eq!(cards[0].difficulty, Difficulty::Hard);
}

#[tokio::test]
async fn topic_filter_is_exact() {
    let store = MemoryStore::new();
    for topic in ["Biology", "biology", "Chemistry", "Biology"] {
        store
            .save_flashcard(NewFlashcard::new("q", "a", Some(topic), Difficulty::Medium))
            .await
            .unwrap();
    }

    let bio = store.get_all_flashcards(Some("Biology")).await.unwrap();
    assert_eq!(bio.len(), 2);
    assert!(bio.iter().all(|c| c.topic == "Biology"));
    assert_eq!(store.get_all_flashcards(None).await.unwrap().len(), 4);
    assert!(store.get_all_flashcards(Some("Physics")).await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_increase_and_listing_is_newest_first() {
    let store = MemoryStore::new();
    let first = store
        .save_flashcard(NewFlashcard::new("one", "1", None, Difficulty::Easy))
        .await
        .unwrap();
    let second = store
        .save_flashcard(NewFlashcard::new("two", "2", None, Difficulty::Easy))
        .await
        .unwrap();
    assert!(second > first);

    let cards = store.get_all_flashcards(None).await.unwrap();
    assert_eq!(cards[0].id, second);
    assert_eq!(cards[1].id, first);
    assert_eq!(cards[0].topic, "General");
}

#[tokio::test]
async fn study_sessions_get_their_own_ids() {
    let store = MemoryStore::new();
    let a = store.save_study_session("Session - General", "notes").await.unwrap();
    let b = store.save_study_session("Session - Biology", "more notes").await.unwrap();
    assert_ne!(a, b);

    let sessions = store.study_sessions();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[1].session_name, "Session - Biology");
    assert_eq!(sessions[1].original_text, "more notes");
}
