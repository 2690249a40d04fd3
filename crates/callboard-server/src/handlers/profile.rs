// crates/callboard-server/src/handlers/profile.rs
// ============================================================================
// Module: Profile Handlers
// Description: Speaker profile page, question answers, and anonymization.
// Purpose: Serve the authenticated speaker's profile surface for an event.
// Dependencies: axum, callboard-core
// ============================================================================

//! ## Overview
//! The profile page combines the global account fields (name) with the
//! per-event biography and the event's speaker questions. Both forms post to
//! the same path and are multiplexed by a hidden `form` field. Profile
//! deletion anonymizes in place: rows stay, identifying fields are replaced
//! deterministically, and biographies are cleared across all events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use callboard_core::Answer;
use callboard_core::Event;
use callboard_core::Locale;
use callboard_core::QuestionId;
use callboard_core::Speaker;
use callboard_core::SpeakerProfile;

use crate::error::PageError;
use crate::handlers::load_event;
use crate::handlers::require_speaker;
use crate::i18n::Message;
use crate::pages;
use crate::server::AppState;
use crate::session;

// ============================================================================
// SECTION: Profile Page
// ============================================================================

/// `GET /{event}/me` — profile and question form.
pub async fn show(
    State(state): State<AppState>,
    Path(event): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    render_profile(&state, locale, &event, &speaker)
}

/// Loads the biography, questions, and answers and renders the profile page.
fn render_profile(
    state: &AppState,
    locale: Locale,
    event: &Event,
    speaker: &Speaker,
) -> Result<Html<String>, PageError> {
    let biography = state
        .store
        .profile(speaker.id, event.id)?
        .map(|profile| profile.biography)
        .unwrap_or_default();
    let questions = state.store.questions_for_event(event.id)?;
    let mut answers: HashMap<QuestionId, String> = HashMap::new();
    for question in &questions {
        if let Some(answer) = state.store.answer(speaker.id, question.id)? {
            answers.insert(question.id, answer.value);
        }
    }
    Ok(Html(pages::profile_page(
        locale, event, speaker, &biography, &questions, &answers,
    )))
}

// ============================================================================
// SECTION: Profile Updates
// ============================================================================

/// `POST /{event}/me` — multiplexed profile and question form.
///
/// The hidden `form` field selects the submitted form: `profile` updates the
/// global name and the per-event biography, `questions` upserts
/// `question_<id>` answers. Unknown selectors are rejected.
pub async fn update(
    State(state): State<AppState>,
    Path(event): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    match form.get("form").map(String::as_str) {
        Some("profile") => update_profile(&state, &event, &speaker, &form)?,
        Some("questions") => update_answers(&state, &event, &speaker, &form)?,
        other => {
            let label = other.unwrap_or("<missing>");
            return Err(PageError::BadRequest(format!("unknown form selector: {label}")));
        }
    }
    Ok(Html(pages::notice_page(locale, Message::SavedNotice)))
}

/// Applies the `profile` form: global name plus per-event biography.
fn update_profile(
    state: &AppState,
    event: &Event,
    speaker: &Speaker,
    form: &HashMap<String, String>,
) -> Result<(), PageError> {
    if let Some(name) = form.get("name") {
        let updated = Speaker {
            name: name.clone(),
            ..speaker.clone()
        };
        state.store.update_speaker(&updated)?;
    }
    if let Some(biography) = form.get("biography") {
        state.store.upsert_profile(&SpeakerProfile {
            speaker_id: speaker.id,
            event_id: event.id,
            biography: biography.clone(),
        })?;
    }
    Ok(())
}

/// Applies the `questions` form: upserts `question_<id>` answers.
fn update_answers(
    state: &AppState,
    event: &Event,
    speaker: &Speaker,
    form: &HashMap<String, String>,
) -> Result<(), PageError> {
    for question in state.store.questions_for_event(event.id)? {
        let field = format!("question_{}", question.id.get());
        if let Some(value) = form.get(&field) {
            state.store.upsert_answer(&Answer {
                speaker_id: speaker.id,
                question_id: question.id,
                value: value.clone(),
            })?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Anonymization
// ============================================================================

/// `POST /{event}/me/delete` — anonymize the authenticated speaker.
///
/// Requires a truthy `really` field as an explicit confirmation. The speaker
/// row is anonymized in place and every per-event biography is cleared;
/// submissions and answers keep their references.
pub async fn delete(
    State(state): State<AppState>,
    Path(event): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let confirmed = form
        .get("really")
        .is_some_and(|value| matches!(value.as_str(), "true" | "1" | "on" | "yes"));
    if !confirmed {
        return Err(PageError::BadRequest(
            "profile deletion requires confirmation".to_string(),
        ));
    }
    state.store.update_speaker(&speaker.anonymized())?;
    state.store.clear_profile_biographies(speaker.id)?;
    Ok(Html(pages::notice_page(locale, Message::ProfileDeleted)))
}
