// crates/callboard-core/src/core/invitation.rs
// ============================================================================
// Module: Callboard Invitations
// Description: Co-speaker invitation records.
// Purpose: Track email-based invites from a submission to a co-speaker.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A speaker invites a co-speaker by email. The invitation carries the
//! message that was enqueued on the outbox and an unguessable token; whoever
//! accepts the token while authenticated joins the submission's speaker set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EventId;
use crate::core::identifiers::InviteToken;
use crate::core::identifiers::SubmissionCode;

// ============================================================================
// SECTION: Invitation
// ============================================================================

/// Email-based co-speaker invitation.
///
/// # Invariants
/// - `token` is unique across invitations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Acceptance token.
    pub token: InviteToken,
    /// Event scoping the invited submission.
    pub event_id: EventId,
    /// Submission the invite attaches to.
    pub submission: SubmissionCode,
    /// Invited email address.
    pub email: String,
    /// Subject of the enqueued message.
    pub subject: String,
    /// Body of the enqueued message.
    pub text: String,
}
