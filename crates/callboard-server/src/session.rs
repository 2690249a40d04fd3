// crates/callboard-server/src/session.rs
// ============================================================================
// Module: Request Identity and Locale
// Description: Bearer session resolution and per-request locale selection.
// Purpose: Turn raw request headers into an authenticated speaker and locale.
// Dependencies: axum, callboard-core
// ============================================================================

//! ## Overview
//! Sessions are bearer tokens resolved through the store; there is no login
//! endpoint, tokens are issued at the store seam. Locale selection follows a
//! fixed precedence: the `cfp_locale` cookie wins, then the authenticated
//! speaker's stored preference, then the event default. A locale the event
//! does not offer is ignored at its precedence step, never rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use axum::http::header;
use callboard_core::Event;
use callboard_core::Locale;
use callboard_core::SessionToken;
use callboard_core::SharedCfpStore;
use callboard_core::Speaker;

use crate::error::PageError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cookie carrying an explicit locale override.
pub const LOCALE_COOKIE: &str = "cfp_locale";

// ============================================================================
// SECTION: Bearer Sessions
// ============================================================================

/// Resolves the request's bearer token to a speaker, if any.
///
/// Absent, malformed, or unknown tokens resolve to `Ok(None)`; only backend
/// failures surface as errors.
///
/// # Errors
///
/// Returns [`PageError::Store`] on store backend failure.
pub fn bearer_speaker(
    headers: &HeaderMap,
    store: &SharedCfpStore,
) -> Result<Option<Speaker>, PageError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };
    let Some(speaker_id) = store.session_speaker(&token)? else {
        return Ok(None);
    };
    Ok(store.speaker(speaker_id)?)
}

/// Extracts the bearer token from the `Authorization` header.
#[must_use]
fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(SessionToken::new(token))
}

// ============================================================================
// SECTION: Locale Resolution
// ============================================================================

/// Extracts the locale override from the `Cookie` header, if present.
#[must_use]
pub fn cookie_locale(headers: &HeaderMap) -> Option<Locale> {
    let value = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?;
        if name != LOCALE_COOKIE {
            continue;
        }
        return Locale::parse(parts.next()?.trim());
    }
    None
}

/// Selects the rendering locale for a request.
///
/// Precedence: cookie override, then the speaker's stored preference, then
/// the event default. Candidates the event does not offer are skipped.
#[must_use]
pub fn resolve_locale(
    cookie: Option<Locale>,
    speaker: Option<&Speaker>,
    event: &Event,
) -> Locale {
    if let Some(locale) = cookie {
        if event.supports_locale(locale) {
            return locale;
        }
    }
    if let Some(speaker) = speaker {
        if event.supports_locale(speaker.locale) {
            return speaker.locale;
        }
    }
    event.default_locale
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only header parsing assertions."
    )]

    use std::num::NonZeroU64;

    use axum::http::HeaderMap;
    use axum::http::HeaderValue;
    use axum::http::header;
    use callboard_core::Event;
    use callboard_core::EventId;
    use callboard_core::EventSlug;
    use callboard_core::Locale;
    use callboard_core::Speaker;
    use callboard_core::SpeakerId;

    use super::cookie_locale;
    use super::resolve_locale;

    fn event_with_locales(locales: Vec<Locale>) -> Event {
        Event {
            id: EventId::new(NonZeroU64::new(1).unwrap()),
            slug: EventSlug::new("demo"),
            name: "Demo Conference".to_string(),
            locales,
            default_locale: Locale::En,
        }
    }

    fn speaker_with_locale(locale: Locale) -> Speaker {
        Speaker {
            id: SpeakerId::new(NonZeroU64::new(1).unwrap()),
            name: "Jane".to_string(),
            email: "jane@example.org".to_string(),
            nick: "jane".to_string(),
            locale,
        }
    }

    #[test]
    fn cookie_locale_parses_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; cfp_locale=de; other=1"),
        );
        assert_eq!(cookie_locale(&headers), Some(Locale::De));
    }

    #[test]
    fn cookie_locale_rejects_unknown_codes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("cfp_locale=fr"));
        assert_eq!(cookie_locale(&headers), None);
    }

    #[test]
    fn cookie_wins_over_speaker_preference() {
        let event = event_with_locales(vec![Locale::En, Locale::De]);
        let speaker = speaker_with_locale(Locale::En);
        let locale = resolve_locale(Some(Locale::De), Some(&speaker), &event);
        assert_eq!(locale, Locale::De);
    }

    #[test]
    fn speaker_preference_wins_over_event_default() {
        let event = event_with_locales(vec![Locale::En, Locale::De]);
        let speaker = speaker_with_locale(Locale::De);
        let locale = resolve_locale(None, Some(&speaker), &event);
        assert_eq!(locale, Locale::De);
    }

    #[test]
    fn unsupported_candidates_fall_through_to_default() {
        let event = event_with_locales(vec![Locale::En]);
        let speaker = speaker_with_locale(Locale::De);
        let locale = resolve_locale(Some(Locale::De), Some(&speaker), &event);
        assert_eq!(locale, Locale::En);
    }
}
