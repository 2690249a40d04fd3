// crates/callboard-server/src/handlers/locale.rs
// ============================================================================
// Module: Locale Handler
// Description: Locale switching endpoint with cookie and redirect handling.
// Purpose: Set the locale override and persist it for authenticated speakers.
// Dependencies: axum, callboard-core, serde
// ============================================================================

//! ## Overview
//! Switching locale sets the `cfp_locale` cookie, persists the choice on the
//! authenticated speaker's account when a session is present, and redirects
//! with 303 to the `next` path. Only same-site paths are honored as redirect
//! targets; anything else falls back to the event landing page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use callboard_core::Locale;
use callboard_core::Speaker;
use serde::Deserialize;

use crate::error::PageError;
use crate::handlers::load_event;
use crate::server::AppState;
use crate::session;
use crate::session::LOCALE_COOKIE;

// ============================================================================
// SECTION: Query
// ============================================================================

/// Query parameters of the locale switch endpoint.
#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    /// Requested locale code.
    locale: Option<String>,
    /// Redirect target after switching.
    next: Option<String>,
}

/// Returns whether a redirect target is a same-site path.
fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// `GET /{event}/locale/set` — switch the UI locale.
///
/// Unknown locale codes and locales the event does not offer are rejected
/// with 400; the cookie is only ever set to an offered locale.
pub async fn set(
    State(state): State<AppState>,
    Path(event): Path<String>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let event = load_event(&state, &event)?;
    let code = query
        .locale
        .ok_or_else(|| PageError::BadRequest("missing locale parameter".to_string()))?;
    let locale = Locale::parse(&code)
        .filter(|candidate| event.supports_locale(*candidate))
        .ok_or_else(|| PageError::BadRequest(format!("unsupported locale: {code}")))?;
    if let Some(speaker) = session::bearer_speaker(&headers, &state.store)? {
        let updated = Speaker {
            locale,
            ..speaker
        };
        state.store.update_speaker(&updated)?;
    }
    let fallback = format!("/{}", event.slug.as_str());
    let target = query
        .next
        .filter(|next| is_safe_redirect(next))
        .unwrap_or(fallback);
    let cookie = format!("{LOCALE_COOKIE}={}; Path=/; SameSite=Lax", locale.as_str());
    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, cookie),
            (header::LOCATION, target),
        ],
    )
        .into_response())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
