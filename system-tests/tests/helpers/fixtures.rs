// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Store Fixtures
// Description: Store-seam fixtures for Callboard system-tests.
// Purpose: Seed events, speakers, sessions, submissions, and questions.
// Dependencies: callboard-core
// ============================================================================

use std::num::NonZeroU64;

use callboard_core::Event;
use callboard_core::EventId;
use callboard_core::EventSlug;
use callboard_core::Locale;
use callboard_core::Question;
use callboard_core::QuestionId;
use callboard_core::QuestionVariant;
use callboard_core::Session;
use callboard_core::SessionToken;
use callboard_core::SharedCfpStore;
use callboard_core::Speaker;
use callboard_core::SpeakerId;
use callboard_core::Submission;
use callboard_core::SubmissionCode;
use callboard_core::SubmissionContent;
use callboard_core::SubmissionState;

/// Slug of the seeded test event.
pub const EVENT_SLUG: &str = "democon";

/// Converts a raw value into a non-zero identifier payload.
fn non_zero(raw: u64) -> NonZeroU64 {
    NonZeroU64::new(raw).expect("fixture identifiers must be non-zero")
}

/// Seeds the test event with English and German enabled.
pub fn seed_event(store: &SharedCfpStore) -> Event {
    let event = Event {
        id: EventId::new(non_zero(1)),
        slug: EventSlug::new(EVENT_SLUG),
        name: "DemoCon".to_string(),
        locales: vec![Locale::En, Locale::De],
        default_locale: Locale::En,
    };
    store.insert_event(&event).expect("event fixture must insert");
    event
}

/// Seeds a speaker with an active session; returns the bearer token too.
pub fn seed_speaker(
    store: &SharedCfpStore,
    raw_id: u64,
    name: &str,
    email: &str,
    nick: &str,
) -> (Speaker, String) {
    let speaker = Speaker {
        id: SpeakerId::new(non_zero(raw_id)),
        name: name.to_string(),
        email: email.to_string(),
        nick: nick.to_string(),
        locale: Locale::En,
    };
    store.insert_speaker(&speaker).expect("speaker fixture must insert");
    let token = format!("session-{raw_id}");
    store
        .insert_session(&Session {
            token: SessionToken::new(token.as_str()),
            speaker_id: speaker.id,
        })
        .expect("session fixture must insert");
    (speaker, token)
}

/// Seeds a submission in the given state, owned by the given speakers.
pub fn seed_submission(
    store: &SharedCfpStore,
    event: &Event,
    code: &str,
    state: SubmissionState,
    speakers: &[SpeakerId],
) -> Submission {
    let submission = Submission {
        code: SubmissionCode::new(code),
        event_id: event.id,
        content: SubmissionContent {
            title: "A talk about talks".to_string(),
            abstract_text: "Talks, in brief.".to_string(),
            description: "Talks, at length.".to_string(),
            notes: String::new(),
            submission_type: "Talk".to_string(),
            content_locale: Locale::En,
        },
        state,
        speakers: speakers.to_vec(),
    };
    store.insert_submission(&submission).expect("submission fixture must insert");
    submission
}

/// Seeds a question of the given variant on the event.
pub fn seed_question(
    store: &SharedCfpStore,
    event: &Event,
    raw_id: u64,
    prompt: &str,
    variant: QuestionVariant,
) -> Question {
    let question = Question {
        id: QuestionId::new(non_zero(raw_id)),
        event_id: event.id,
        prompt: prompt.to_string(),
        variant,
    };
    store.insert_question(&question).expect("question fixture must insert");
    question
}
