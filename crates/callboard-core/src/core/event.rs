// crates/callboard-core/src/core/event.rs
// ============================================================================
// Module: Callboard Events
// Description: Conference event records scoping the CFP surface.
// Purpose: Carry event identity, slug routing, and enabled locales.
// Dependencies: crate::core::{identifiers, locale}, serde
// ============================================================================

//! ## Overview
//! Every CFP page is scoped to an event addressed by its URL slug. Events
//! carry the set of locales they render in and the default locale used when
//! neither a cookie nor a speaker preference applies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EventId;
use crate::core::identifiers::EventSlug;
use crate::core::locale::Locale;

// ============================================================================
// SECTION: Event
// ============================================================================

/// Conference event hosting a Call for Papers.
///
/// # Invariants
/// - `slug` is unique across events.
/// - `default_locale` is a member of `locales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// URL slug addressing the event.
    pub slug: EventSlug,
    /// Human-readable event name.
    pub name: String,
    /// Locales the event renders in.
    pub locales: Vec<Locale>,
    /// Locale used when no preference applies.
    pub default_locale: Locale,
}

impl Event {
    /// Returns whether the event renders in the given locale.
    #[must_use]
    pub fn supports_locale(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }
}
