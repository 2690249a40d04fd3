// crates/callboard-server/src/handlers/invite.rs
// ============================================================================
// Module: Invitation Handlers
// Description: Co-speaker invitation form, delivery, and acceptance.
// Purpose: Let owners invite co-speakers by email and accept via token.
// Dependencies: axum, callboard-core, rand
// ============================================================================

//! ## Overview
//! Inviting a co-speaker enqueues exactly one outbox message to the invited
//! address and records an invitation under an unguessable token. Accepting
//! the token while authenticated adds the accepting speaker to the
//! submission's speaker set; accepting twice leaves the set unchanged
//! because the speaker set has set semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use callboard_core::Invitation;
use callboard_core::InviteToken;
use callboard_core::MailMessage;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::PageError;
use crate::handlers::load_event;
use crate::handlers::owned_submission;
use crate::handlers::require_speaker;
use crate::i18n::Message;
use crate::pages;
use crate::server::AppState;
use crate::session;

// ============================================================================
// SECTION: Token Generation
// ============================================================================

/// Issues a fresh unguessable invitation token.
#[must_use]
fn fresh_token() -> InviteToken {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    let mut token = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        token.push_str(&format!("{byte:02x}"));
    }
    InviteToken::new(token)
}

// ============================================================================
// SECTION: Invite Form
// ============================================================================

/// `GET /{event}/submissions/{code}/invite` — invite form for an owner.
pub async fn form(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let submission = owned_submission(&state, &event, &code, &speaker)?;
    Ok(Html(pages::invite_page(locale, &event, &submission)))
}

/// `POST /{event}/submissions/{code}/invite` — enqueue one invitation.
pub async fn send(
    State(state): State<AppState>,
    Path((event, code)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let submission = owned_submission(&state, &event, &code, &speaker)?;
    let email = form
        .get("speaker")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PageError::BadRequest("missing invited email address".to_string()))?;
    let subject = form
        .get("subject")
        .cloned()
        .unwrap_or_else(|| format!("Invitation: {}", submission.content.title));
    let token = fresh_token();
    let accept_path =
        format!("/{}/invitation/{}", event.slug.as_str(), token.as_str());
    let mut text = form.get("text").cloned().unwrap_or_default();
    text.push_str("\n\n");
    text.push_str(&accept_path);
    let invitation = Invitation {
        token,
        event_id: event.id,
        submission: submission.code.clone(),
        email: email.clone(),
        subject: subject.clone(),
        text: text.clone(),
    };
    state.store.insert_invitation(&invitation)?;
    state.mail.deliver(&MailMessage {
        to: vec![email],
        subject,
        text,
    })?;
    Ok(Html(pages::notice_page(locale, Message::InviteSent)))
}

// ============================================================================
// SECTION: Acceptance
// ============================================================================

/// `POST /{event}/invitation/{token}` — accept an invitation.
///
/// The accepting speaker joins the submission's speaker set; a repeated
/// accept is a silent no-op.
pub async fn accept(
    State(state): State<AppState>,
    Path((event, token)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let event = load_event(&state, &event)?;
    let speaker = require_speaker(&state, &headers)?;
    let locale =
        session::resolve_locale(session::cookie_locale(&headers), Some(&speaker), &event);
    let invitation = state
        .store
        .invitation(&InviteToken::new(token))?
        .filter(|invitation| invitation.event_id == event.id)
        .ok_or(PageError::NotFound)?;
    state
        .store
        .add_submission_speaker(event.id, &invitation.submission, speaker.id)?;
    Ok(Html(pages::notice_page(locale, Message::InvitationAccepted)))
}
