// crates/callboard-core/tests/memory_store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Exercises the in-memory CfpStore against interface semantics.
// ============================================================================
//! ## Overview
//! Validates answer upsert, speaker-set semantics, and anonymization flows on
//! the in-memory store.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use callboard_core::Answer;
use callboard_core::CfpStore;
use callboard_core::Event;
use callboard_core::EventId;
use callboard_core::InMemoryCfpStore;
use callboard_core::InMemoryOutbox;
use callboard_core::Locale;
use callboard_core::MailMessage;
use callboard_core::MailSink;
use callboard_core::Question;
use callboard_core::QuestionId;
use callboard_core::QuestionVariant;
use callboard_core::Speaker;
use callboard_core::SpeakerId;
use callboard_core::SpeakerProfile;
use callboard_core::Submission;
use callboard_core::SubmissionCode;
use callboard_core::SubmissionContent;
use callboard_core::SubmissionState;

fn event() -> Event {
    Event {
        id: EventId::from_raw(1).unwrap(),
        slug: "democon".into(),
        name: "DemoCon".to_string(),
        locales: vec![Locale::En, Locale::De],
        default_locale: Locale::En,
    }
}

fn speaker(raw: u64) -> Speaker {
    Speaker {
        id: SpeakerId::from_raw(raw).unwrap(),
        name: format!("Speaker {raw}"),
        email: format!("speaker{raw}@example.org"),
        nick: format!("speaker{raw}"),
        locale: Locale::En,
    }
}

fn submission(code: &str, speaker_id: SpeakerId) -> Submission {
    Submission {
        code: SubmissionCode::new(code),
        event_id: EventId::from_raw(1).unwrap(),
        content: SubmissionContent {
            title: "A Talk".to_string(),
            abstract_text: "Short abstract".to_string(),
            description: "Long description".to_string(),
            notes: String::new(),
            submission_type: "talk".to_string(),
            content_locale: Locale::En,
        },
        state: SubmissionState::Submitted,
        speakers: vec![speaker_id],
    }
}

#[test]
fn answers_are_upserted_per_speaker_and_question() {
    let store = InMemoryCfpStore::new();
    let speaker_id = SpeakerId::from_raw(1).unwrap();
    let question_id = QuestionId::from_raw(10).unwrap();
    store
        .insert_question(&Question {
            id: question_id,
            event_id: EventId::from_raw(1).unwrap(),
            prompt: "What is your favorite color?".to_string(),
            variant: QuestionVariant::Text,
        })
        .unwrap();
    assert!(store.answer(speaker_id, question_id).unwrap().is_none());

    store
        .upsert_answer(&Answer {
            speaker_id,
            question_id,
            value: "black as the night".to_string(),
        })
        .unwrap();
    let created = store.answer(speaker_id, question_id).unwrap().unwrap();
    assert_eq!(created.value, "black as the night");

    store
        .upsert_answer(&Answer {
            speaker_id,
            question_id,
            value: "green as the sky".to_string(),
        })
        .unwrap();
    let updated = store.answer(speaker_id, question_id).unwrap().unwrap();
    assert_eq!(updated.value, "green as the sky");
}

#[test]
fn submission_speaker_set_deduplicates() {
    let store = InMemoryCfpStore::new();
    let owner = speaker(1);
    let guest = speaker(2);
    store.insert_event(&event()).unwrap();
    store.insert_speaker(&owner).unwrap();
    store.insert_speaker(&guest).unwrap();
    let entry = submission("ABC123", owner.id);
    store.insert_submission(&entry).unwrap();

    let event_id = EventId::from_raw(1).unwrap();
    store.add_submission_speaker(event_id, &entry.code, guest.id).unwrap();
    store.add_submission_speaker(event_id, &entry.code, guest.id).unwrap();

    let stored = store.submission(event_id, &entry.code).unwrap().unwrap();
    assert_eq!(stored.speakers, vec![owner.id, guest.id]);
}

#[test]
fn anonymization_clears_every_profile_biography() {
    let store = InMemoryCfpStore::new();
    let account = speaker(3);
    store.insert_event(&event()).unwrap();
    store.insert_speaker(&account).unwrap();
    store
        .upsert_profile(&SpeakerProfile {
            speaker_id: account.id,
            event_id: EventId::from_raw(1).unwrap(),
            biography: "Ruling since forever.".to_string(),
        })
        .unwrap();

    store.update_speaker(&account.anonymized()).unwrap();
    store.clear_profile_biographies(account.id).unwrap();

    let stored = store.speaker(account.id).unwrap().unwrap();
    assert_eq!(stored.name, "Deleted User");
    assert!(stored.nick.starts_with("deleted_user"));
    assert!(stored.email.starts_with("deleted_user"));
    assert!(stored.email.ends_with("@localhost"));
    let profile =
        store.profile(account.id, EventId::from_raw(1).unwrap()).unwrap().unwrap();
    assert_eq!(profile.biography, "");
}

#[test]
fn outbox_records_messages_in_order() {
    let outbox = InMemoryOutbox::new();
    assert!(outbox.messages().is_empty());
    outbox
        .deliver(&MailMessage {
            to: vec!["other@speaker.org".to_string()],
            subject: "Please join!".to_string(),
            text: "C'mon, it will be fun!".to_string(),
        })
        .unwrap();
    let messages = outbox.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].to, vec!["other@speaker.org".to_string()]);
}
