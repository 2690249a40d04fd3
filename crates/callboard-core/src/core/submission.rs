// crates/callboard-core/src/core/submission.rs
// ============================================================================
// Module: Callboard Submissions
// Description: Submission records and the state transition guard.
// Purpose: Capture the CFP workflow with soft no-op transition semantics.
// Dependencies: crate::core::{identifiers, locale}, serde
// ============================================================================

//! ## Overview
//! A submission moves through a linear workflow: draft and submitted entries
//! may be withdrawn, accepted entries may be confirmed, rejected entries are
//! immutable. Disallowed transitions are not errors: the guard reports them
//! as [`Transition::Ignored`] and the HTTP layer renders success while the
//! persisted state stays untouched. Callers must only persist state when the
//! guard reports [`Transition::Applied`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EventId;
use crate::core::identifiers::SpeakerId;
use crate::core::identifiers::SubmissionCode;
use crate::core::locale::Locale;

// ============================================================================
// SECTION: Submission State
// ============================================================================

/// Submission lifecycle state.
///
/// # Invariants
/// - Variants are stable for serialization and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Draft not yet handed to the organizers.
    Draft,
    /// Submitted and awaiting review.
    Submitted,
    /// Accepted by the organizers, awaiting speaker confirmation.
    Accepted,
    /// Rejected by the organizers; immutable from here on.
    Rejected,
    /// Confirmed by the speaker.
    Confirmed,
    /// Withdrawn by the speaker.
    Withdrawn,
}

impl SubmissionState {
    /// Returns the stable storage form of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Confirmed => "confirmed",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Parses a stored state string (returns `None` for unknown values).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "confirmed" => Some(Self::Confirmed),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Gates the speaker-initiated confirm transition.
    ///
    /// Confirming is allowed only from `accepted`; re-confirming an already
    /// confirmed submission is an idempotent no-op that still counts as
    /// applied. Every other state is left unchanged.
    #[must_use]
    pub const fn confirm(self) -> Transition {
        match self {
            Self::Accepted | Self::Confirmed => Transition::Applied(Self::Confirmed),
            Self::Draft | Self::Submitted | Self::Rejected | Self::Withdrawn => Transition::Ignored,
        }
    }

    /// Gates the speaker-initiated withdraw transition.
    ///
    /// Withdrawing is allowed while the submission is still in the review
    /// funnel (`draft` or `submitted`). Accepted submissions and terminal
    /// states are left unchanged.
    #[must_use]
    pub const fn withdraw(self) -> Transition {
        match self {
            Self::Draft | Self::Submitted => Transition::Applied(Self::Withdrawn),
            Self::Accepted | Self::Rejected | Self::Confirmed | Self::Withdrawn => {
                Transition::Ignored
            }
        }
    }

    /// Returns whether speaker edits to submission content are allowed.
    ///
    /// Rejected submissions are immutable; every other state accepts edits.
    #[must_use]
    pub const fn allows_edit(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Outcome of a guarded state transition.
///
/// # Invariants
/// - `Ignored` means the persisted state must stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition applies; persist the carried state.
    Applied(SubmissionState),
    /// The transition is disallowed; persist nothing and render success.
    Ignored,
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Editable submission content.
///
/// # Invariants
/// - Fields mirror the speaker-facing edit form one to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionContent {
    /// Talk title.
    pub title: String,
    /// Short abstract shown in listings.
    pub abstract_text: String,
    /// Long-form description.
    pub description: String,
    /// Private notes for the organizers.
    pub notes: String,
    /// Submission type label (talk, workshop, ...).
    pub submission_type: String,
    /// Locale the content is written in.
    pub content_locale: Locale,
}

/// A proposed talk tracked through the CFP workflow.
///
/// # Invariants
/// - `code` is unique within the event.
/// - `speakers` is an ordered set: no duplicate speaker identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission code addressing this record in URLs.
    pub code: SubmissionCode,
    /// Event the submission belongs to.
    pub event_id: EventId,
    /// Editable content fields.
    pub content: SubmissionContent,
    /// Current workflow state.
    pub state: SubmissionState,
    /// Speakers attached to the submission, in attachment order.
    pub speakers: Vec<SpeakerId>,
}

impl Submission {
    /// Returns whether the given speaker owns this submission.
    #[must_use]
    pub fn is_owned_by(&self, speaker: SpeakerId) -> bool {
        self.speakers.contains(&speaker)
    }
}
