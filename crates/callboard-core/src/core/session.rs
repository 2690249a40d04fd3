// crates/callboard-core/src/core/session.rs
// ============================================================================
// Module: Callboard Sessions
// Description: Bearer-token sessions binding requests to speakers.
// Purpose: Model the authentication seam without a password subsystem.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Requests authenticate with a bearer token resolved to a speaker through
//! the store. Sessions are issued at the store seam; Callboard carries no
//! password subsystem in its observable scope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::SessionToken;
use crate::core::identifiers::SpeakerId;

// ============================================================================
// SECTION: Session
// ============================================================================

/// Bearer-token session.
///
/// # Invariants
/// - `token` is unique across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session token presented by the client.
    pub token: SessionToken,
    /// Speaker the session authenticates.
    pub speaker_id: SpeakerId,
}
