// crates/callboard-server/src/handlers/submissions.rs
// ============================================================================
// Module: Submission Handlers
// Description: Submission pages, content editing, and workflow actions.
// Purpose: Serve the submission surface with soft no-op workflow semantics.
// Dependencies: axum, callboard-core
// ============================================================================

//! ## Overview
//! Submission pages enforce ownership before revealing anything: a foreign or
//! unknown code renders 404 either way. Workflow actions route through the
//! domain guard; a disallowed transition renders the unchanged submission
//! with status 200 and persists nothing. Content edits are dropped the same
//! way when the state forbids them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use callboard_core::Locale;
use callboard_core::Transition;

use crate::error::PageError;
use crate::handlers::load_event;
use crate::handlers::owned_submission;
use crate::handlers::require_speaker;
use crate::pages;
use crate::server::AppState;
use crate::session;

// ============================================================================
// SECTION: Landing Page
// ============================================================================

/// `GET /{event}` — public event landing page.
pub async fn landing(
    State(state): State<AppState>,
    Path(event): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = session::bearer_speaker(&headers, &state.store)?;
    let locale = session::resolve_locale(
        session::cookie_locale(&headers),
        speaker.as_ref(),
        &event,
    );
    Ok(Html(pages::landing_page(locale, &event)))
}

// ============================================================================
// SECTION: Submission Pages
// ============================================================================

/// `GET /{event}/me/submissions` — the authenticated speaker's submissions.
pub async fn list(
    State(state): State<AppState>,
    Path(event): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let submissions = state.store.submissions_for_speaker(event.id, speaker.id)?;
    Ok(Html(pages::submission_list_page(locale, &event, &submissions)))
}

/// `GET /{event}/submissions/{code}` — submission detail for an owner.
pub async fn view(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let submission = owned_submission(&state, &event, &code, &speaker)?;
    Ok(Html(pages::submission_page(locale, &event, &submission)))
}

/// `POST /{event}/submissions/{code}` — edit submission content.
///
/// Edits to a rejected submission are dropped; the unchanged submission is
/// rendered with status 200.
pub async fn edit(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let mut submission = owned_submission(&state, &event, &code, &speaker)?;
    if submission.state.allows_edit() {
        let mut content = submission.content.clone();
        if let Some(title) = form.get("title") {
            content.title = title.clone();
        }
        if let Some(abstract_text) = form.get("abstract") {
            content.abstract_text = abstract_text.clone();
        }
        if let Some(description) = form.get("description") {
            content.description = description.clone();
        }
        if let Some(notes) = form.get("notes") {
            content.notes = notes.clone();
        }
        if let Some(submission_type) = form.get("submission_type") {
            content.submission_type = submission_type.clone();
        }
        if let Some(locale_code) = form.get("content_locale") {
            content.content_locale = Locale::parse(locale_code)
                .ok_or_else(|| PageError::BadRequest(format!("unknown locale: {locale_code}")))?;
        }
        state
            .store
            .update_submission_content(event.id, &submission.code, &content)?;
        submission.content = content;
    }
    Ok(Html(pages::submission_page(locale, &event, &submission)))
}

// ============================================================================
// SECTION: Workflow Actions
// ============================================================================

/// `GET /{event}/submissions/{code}/confirm` — confirm an accepted talk.
pub async fn confirm(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let mut submission = owned_submission(&state, &event, &code, &speaker)?;
    if let Transition::Applied(next) = submission.state.confirm() {
        state
            .store
            .update_submission_state(event.id, &submission.code, next)?;
        submission.state = next;
    }
    Ok(Html(pages::submission_page(locale, &event, &submission)))
}

/// `GET /{event}/submissions/{code}/withdraw` — withdraw a pending talk.
pub async fn withdraw(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let mut submission = owned_submission(&state, &event, &code, &speaker)?;
    if let Transition::Applied(next) = submission.state.withdraw() {
        state
            .store
            .update_submission_state(event.id, &submission.code, next)?;
        submission.state = next;
    }
    Ok(Html(pages::submission_page(locale, &event, &submission)))
}
