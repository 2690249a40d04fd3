// crates/callboard-core/src/core/speaker.rs
// ============================================================================
// Module: Callboard Speakers
// Description: Speaker accounts and per-event profiles.
// Purpose: Carry speaker identity and the deterministic anonymization rule.
// Dependencies: crate::core::{identifiers, locale}, serde
// ============================================================================

//! ## Overview
//! Speakers are global accounts; biographies are per-event profiles. Profile
//! deletion does not remove rows: it anonymizes the identifying fields in
//! place with a deterministic `deleted_user_<id>` prefix so that references
//! from submissions and answers stay intact. Anonymization is irreversible
//! and idempotent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EventId;
use crate::core::identifiers::SpeakerId;
use crate::core::locale::Locale;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Display name assigned to anonymized speakers.
pub const DELETED_NAME: &str = "Deleted User";
/// Prefix of anonymized nicks and email local parts.
pub const DELETED_PREFIX: &str = "deleted_user";
/// Host part of anonymized email addresses.
pub const DELETED_MAIL_HOST: &str = "localhost";

// ============================================================================
// SECTION: Speaker
// ============================================================================

/// Global speaker account.
///
/// # Invariants
/// - `email` and `nick` are unique across speakers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Speaker identifier.
    pub id: SpeakerId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Public nickname.
    pub nick: String,
    /// Stored locale preference.
    pub locale: Locale,
}

impl Speaker {
    /// Returns the anonymized form of this speaker.
    ///
    /// The result is deterministic in the speaker identifier, so repeated
    /// anonymization is idempotent. The locale preference is retained; it is
    /// not identifying.
    #[must_use]
    pub fn anonymized(&self) -> Self {
        Self {
            id: self.id,
            name: DELETED_NAME.to_string(),
            email: format!("{DELETED_PREFIX}_{}@{DELETED_MAIL_HOST}", self.id),
            nick: format!("{DELETED_PREFIX}_{}", self.id),
            locale: self.locale,
        }
    }
}

// ============================================================================
// SECTION: Speaker Profile
// ============================================================================

/// Per-event speaker profile.
///
/// # Invariants
/// - At most one profile exists per (speaker, event) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerProfile {
    /// Speaker the profile belongs to.
    pub speaker_id: SpeakerId,
    /// Event the profile is scoped to.
    pub event_id: EventId,
    /// Event-specific biography.
    pub biography: String,
}
