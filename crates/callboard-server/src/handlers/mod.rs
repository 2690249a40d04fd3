// crates/callboard-server/src/handlers/mod.rs
// ============================================================================
// Module: Page Handlers
// Description: Axum handlers for the speaker-facing CFP pages.
// Purpose: Route request data through the domain and render responses.
// Dependencies: axum, callboard-core
// ============================================================================

//! ## Overview
//! Handlers are grouped by surface: submission pages and workflow actions,
//! co-speaker invitations, the profile and question forms, and locale
//! switching. Shared lookup helpers live here so every handler applies the
//! same access policy: unknown events, unauthenticated requests, and foreign
//! submissions all resolve to 404.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod invite;
pub mod locale;
pub mod profile;
pub mod submissions;

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use callboard_core::Event;
use callboard_core::EventSlug;
use callboard_core::Speaker;
use callboard_core::Submission;
use callboard_core::SubmissionCode;

use crate::error::PageError;
use crate::server::AppState;
use crate::session;

// ============================================================================
// SECTION: Shared Lookups
// ============================================================================

/// Loads the event addressed by a URL slug.
///
/// # Errors
///
/// Returns [`PageError::NotFound`] for unknown slugs.
pub(crate) fn load_event(state: &AppState, slug: &str) -> Result<Event, PageError> {
    state
        .store
        .event_by_slug(&EventSlug::new(slug))?
        .ok_or(PageError::NotFound)
}

/// Resolves the request's bearer session to a speaker.
///
/// # Errors
///
/// Returns [`PageError::NotFound`] for absent or unknown sessions; speaker
/// pages do not reveal that they exist to unauthenticated requesters.
pub(crate) fn require_speaker(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Speaker, PageError> {
    session::bearer_speaker(headers, &state.store)?.ok_or(PageError::NotFound)
}

/// Loads a submission and enforces the ownership policy.
///
/// # Errors
///
/// Returns [`PageError::NotFound`] when the submission does not exist or the
/// requester is not among its speakers. Both cases are indistinguishable to
/// the client.
pub(crate) fn owned_submission(
    state: &AppState,
    event: &Event,
    code: &str,
    speaker: &Speaker,
) -> Result<Submission, PageError> {
    let submission = state
        .store
        .submission(event.id, &SubmissionCode::new(code))?
        .ok_or(PageError::NotFound)?;
    if !submission.is_owned_by(speaker.id) {
        return Err(PageError::NotFound);
    }
    Ok(submission)
}
