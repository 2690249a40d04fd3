// crates/callboard-store-sqlite/tests/store_persistence.rs
// ============================================================================
// Module: SQLite Store Persistence Tests
// Description: Exercises the durable CfpStore across reopen boundaries.
// ============================================================================
//! ## Overview
//! Validates that CFP records survive a store reopen and that upserts and
//! speaker-set semantics hold on the `SQLite` backend.

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
use callboard_core::Invitation;
use callboard_core::Locale;
use callboard_core::Question;
use callboard_core::QuestionId;
use callboard_core::QuestionVariant;
use callboard_core::Session;
use callboard_core::Speaker;
use callboard_core::SpeakerId;
use callboard_core::SpeakerProfile;
use callboard_core::Submission;
use callboard_core::SubmissionCode;
use callboard_core::SubmissionContent;
use callboard_core::SubmissionState;
use callboard_store_sqlite::SqliteCfpStore;
use callboard_store_sqlite::SqliteStoreConfig;
use callboard_store_sqlite::SqliteStoreMode;
use callboard_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;

fn store_config(dir: &TempDir) -> SqliteStoreConfig {
    SqliteStoreConfig {
        path: dir.path().join("cfp.sqlite"),
        busy_timeout_ms: 5_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    }
}

fn event_id() -> EventId {
    EventId::from_raw(1).unwrap()
}

fn seed(store: &SqliteCfpStore) {
    store
        .insert_event(&Event {
            id: event_id(),
            slug: "democon".into(),
            name: "DemoCon".to_string(),
            locales: vec![Locale::En, Locale::De],
            default_locale: Locale::En,
        })
        .unwrap();
    store
        .insert_speaker(&Speaker {
            id: SpeakerId::from_raw(1).unwrap(),
            name: "Jane Doe".to_string(),
            email: "jane@speaker.org".to_string(),
            nick: "jane".to_string(),
            locale: Locale::En,
        })
        .unwrap();
    store
        .insert_submission(&Submission {
            code: SubmissionCode::new("TALK01"),
            event_id: event_id(),
            content: SubmissionContent {
                title: "A Talk".to_string(),
                abstract_text: "Short abstract".to_string(),
                description: "Long description".to_string(),
                notes: String::new(),
                submission_type: "talk".to_string(),
                content_locale: Locale::En,
            },
            state: SubmissionState::Submitted,
            speakers: vec![SpeakerId::from_raw(1).unwrap()],
        })
        .unwrap();
}

#[test]
fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    {
        let store = SqliteCfpStore::new(&config).unwrap();
        seed(&store);
        store
            .update_submission_state(
                event_id(),
                &SubmissionCode::new("TALK01"),
                SubmissionState::Accepted,
            )
            .unwrap();
    }
    let reopened = SqliteCfpStore::new(&config).unwrap();
    let submission =
        reopened.submission(event_id(), &SubmissionCode::new("TALK01")).unwrap().unwrap();
    assert_eq!(submission.state, SubmissionState::Accepted);
    assert_eq!(submission.content.title, "A Talk");
    assert_eq!(submission.speakers, vec![SpeakerId::from_raw(1).unwrap()]);
    let event = reopened.event_by_slug(&"democon".into()).unwrap().unwrap();
    assert_eq!(event.locales, vec![Locale::En, Locale::De]);
}

#[test]
fn answers_upsert_in_place() {
    let dir = TempDir::new().unwrap();
    let store = SqliteCfpStore::new(&store_config(&dir)).unwrap();
    seed(&store);
    let speaker_id = SpeakerId::from_raw(1).unwrap();
    let question_id = QuestionId::from_raw(5).unwrap();
    store
        .insert_question(&Question {
            id: question_id,
            event_id: event_id(),
            prompt: "Favorite color?".to_string(),
            variant: QuestionVariant::Text,
        })
        .unwrap();
    store
        .upsert_answer(&Answer {
            speaker_id,
            question_id,
            value: "black as the night".to_string(),
        })
        .unwrap();
    store
        .upsert_answer(&Answer {
            speaker_id,
            question_id,
            value: "green as the sky".to_string(),
        })
        .unwrap();
    let answer = store.answer(speaker_id, question_id).unwrap().unwrap();
    assert_eq!(answer.value, "green as the sky");
}

#[test]
fn speaker_set_is_deduplicated_and_ordered() {
    let dir = TempDir::new().unwrap();
    let store = SqliteCfpStore::new(&store_config(&dir)).unwrap();
    seed(&store);
    let second = SpeakerId::from_raw(2).unwrap();
    store
        .insert_speaker(&Speaker {
            id: second,
            name: "Co Speaker".to_string(),
            email: "co@speaker.org".to_string(),
            nick: "co".to_string(),
            locale: Locale::De,
        })
        .unwrap();
    let code = SubmissionCode::new("TALK01");
    store.add_submission_speaker(event_id(), &code, second).unwrap();
    store.add_submission_speaker(event_id(), &code, second).unwrap();
    let submission = store.submission(event_id(), &code).unwrap().unwrap();
    assert_eq!(submission.speakers, vec![SpeakerId::from_raw(1).unwrap(), second]);
    let listed = store.submissions_for_speaker(event_id(), second).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn profile_biographies_clear_for_anonymization() {
    let dir = TempDir::new().unwrap();
    let store = SqliteCfpStore::new(&store_config(&dir)).unwrap();
    seed(&store);
    let speaker_id = SpeakerId::from_raw(1).unwrap();
    store
        .upsert_profile(&SpeakerProfile {
            speaker_id,
            event_id: event_id(),
            biography: "Ruling since forever.".to_string(),
        })
        .unwrap();
    let speaker = store.speaker(speaker_id).unwrap().unwrap();
    store.update_speaker(&speaker.anonymized()).unwrap();
    store.clear_profile_biographies(speaker_id).unwrap();
    let stored = store.speaker(speaker_id).unwrap().unwrap();
    assert_eq!(stored.name, "Deleted User");
    assert_eq!(stored.email, "deleted_user_1@localhost");
    let profile = store.profile(speaker_id, event_id()).unwrap().unwrap();
    assert_eq!(profile.biography, "");
}

#[test]
fn invitations_and_sessions_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = SqliteCfpStore::new(&store_config(&dir)).unwrap();
    seed(&store);
    store
        .insert_invitation(&Invitation {
            token: "tok-1".into(),
            event_id: event_id(),
            submission: SubmissionCode::new("TALK01"),
            email: "other@speaker.org".to_string(),
            subject: "Please join!".to_string(),
            text: "C'mon, it will be fun!".to_string(),
        })
        .unwrap();
    let invitation = store.invitation(&"tok-1".into()).unwrap().unwrap();
    assert_eq!(invitation.email, "other@speaker.org");
    assert_eq!(invitation.submission, SubmissionCode::new("TALK01"));

    store
        .insert_session(&Session {
            token: "sess-1".into(),
            speaker_id: SpeakerId::from_raw(1).unwrap(),
        })
        .unwrap();
    let resolved = store.session_speaker(&"sess-1".into()).unwrap();
    assert_eq!(resolved, Some(SpeakerId::from_raw(1).unwrap()));
    assert!(store.session_speaker(&"missing".into()).unwrap().is_none());
}
