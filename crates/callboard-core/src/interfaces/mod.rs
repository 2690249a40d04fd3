// crates/callboard-core/src/interfaces/mod.rs
// ============================================================================
// Module: Callboard Interfaces
// Description: Backend-agnostic interfaces for persistence and outbound mail.
// Purpose: Define the contract surfaces used by the Callboard server.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Callboard integrates with storage and mail backends
//! without embedding backend-specific details. Implementations must treat
//! persisted rows as untrusted on load and fail closed on malformed data.
//! Lookups distinguish "absent" (`Ok(None)`) from backend failure (`Err`);
//! the HTTP layer maps absence to 404 without revealing ownership.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::event::Event;
use crate::core::identifiers::EventId;
use crate::core::identifiers::EventSlug;
use crate::core::identifiers::InviteToken;
use crate::core::identifiers::QuestionId;
use crate::core::identifiers::SessionToken;
use crate::core::identifiers::SpeakerId;
use crate::core::identifiers::SubmissionCode;
use crate::core::invitation::Invitation;
use crate::core::question::Answer;
use crate::core::question::Question;
use crate::core::session::Session;
use crate::core::speaker::Speaker;
use crate::core::speaker::SpeakerProfile;
use crate::core::submission::Submission;
use crate::core::submission::SubmissionContent;
use crate::core::submission::SubmissionState;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Persistence errors surfaced by [`CfpStore`] implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend failure (I/O, lock, corruption).
    #[error("store backend error: {0}")]
    Backend(String),
    /// A record required by the operation does not exist.
    #[error("record not found: {0}")]
    Missing(&'static str),
    /// A uniqueness or referential constraint was violated.
    #[error("store constraint violated: {0}")]
    Constraint(String),
}

// ============================================================================
// SECTION: CFP Store
// ============================================================================

/// Backend-agnostic persistence surface for the CFP domain.
///
/// Implementations provide request-scoped atomicity per call; Callboard does
/// not require cross-call transactions.
pub trait CfpStore {
    /// Inserts a new event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or slug collision.
    fn insert_event(&self, event: &Event) -> Result<(), StoreError>;

    /// Looks up an event by URL slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn event_by_slug(&self, slug: &EventSlug) -> Result<Option<Event>, StoreError>;

    /// Inserts a new speaker account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or identifier collision.
    fn insert_speaker(&self, speaker: &Speaker) -> Result<(), StoreError>;

    /// Looks up a speaker by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, StoreError>;

    /// Replaces a speaker row (name, email, nick, locale).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] when the speaker does not exist.
    fn update_speaker(&self, speaker: &Speaker) -> Result<(), StoreError>;

    /// Creates or replaces the (speaker, event) profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn upsert_profile(&self, profile: &SpeakerProfile) -> Result<(), StoreError>;

    /// Looks up the (speaker, event) profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn profile(
        &self,
        speaker_id: SpeakerId,
        event_id: EventId,
    ) -> Result<Option<SpeakerProfile>, StoreError>;

    /// Clears the biography on every profile of the given speaker.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn clear_profile_biographies(&self, speaker_id: SpeakerId) -> Result<(), StoreError>;

    /// Inserts a new submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or code collision.
    fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError>;

    /// Looks up a submission by event and code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn submission(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
    ) -> Result<Option<Submission>, StoreError>;

    /// Lists the submissions a speaker is attached to, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn submissions_for_speaker(
        &self,
        event_id: EventId,
        speaker_id: SpeakerId,
    ) -> Result<Vec<Submission>, StoreError>;

    /// Replaces the editable content of a submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] when the submission does not exist.
    fn update_submission_content(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        content: &SubmissionContent,
    ) -> Result<(), StoreError>;

    /// Replaces the workflow state of a submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] when the submission does not exist.
    fn update_submission_state(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        state: SubmissionState,
    ) -> Result<(), StoreError>;

    /// Adds a speaker to a submission's speaker set.
    ///
    /// Adding a speaker that is already attached is a no-op; the speaker set
    /// has set semantics.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] when the submission does not exist.
    fn add_submission_speaker(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        speaker_id: SpeakerId,
    ) -> Result<(), StoreError>;

    /// Inserts a new event question.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or identifier collision.
    fn insert_question(&self, question: &Question) -> Result<(), StoreError>;

    /// Lists the questions defined by an event, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn questions_for_event(&self, event_id: EventId) -> Result<Vec<Question>, StoreError>;

    /// Creates or updates the (speaker, question) answer in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError>;

    /// Looks up the (speaker, question) answer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn answer(
        &self,
        speaker_id: SpeakerId,
        question_id: QuestionId,
    ) -> Result<Option<Answer>, StoreError>;

    /// Inserts a new co-speaker invitation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or token collision.
    fn insert_invitation(&self, invitation: &Invitation) -> Result<(), StoreError>;

    /// Looks up an invitation by token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn invitation(&self, token: &InviteToken) -> Result<Option<Invitation>, StoreError>;

    /// Inserts a new session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or token collision.
    fn insert_session(&self, session: &Session) -> Result<(), StoreError>;

    /// Resolves a session token to its speaker.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure.
    fn session_speaker(&self, token: &SessionToken) -> Result<Option<SpeakerId>, StoreError>;
}

/// Cloneable shared handle over a [`CfpStore`] implementation.
///
/// # Invariants
/// - All clones reference the same underlying store.
#[derive(Clone)]
pub struct SharedCfpStore {
    /// Shared store implementation.
    inner: Arc<dyn CfpStore + Send + Sync>,
}

impl SharedCfpStore {
    /// Wraps a store implementation in a shared handle.
    pub fn from_store<S>(store: S) -> Self
    where
        S: CfpStore + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store implementation.
    #[must_use]
    pub fn from_arc(store: Arc<dyn CfpStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl std::ops::Deref for SharedCfpStore {
    type Target = dyn CfpStore + Send + Sync;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

// ============================================================================
// SECTION: Mail Sink
// ============================================================================

/// Outbound mail message enqueued by the server.
///
/// # Invariants
/// - `to` lists at least one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Message subject.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

/// Mail delivery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MailError {
    /// The sink rejected or failed to record the message.
    #[error("mail sink error: {0}")]
    Sink(String),
}

/// Outbound mail sink.
///
/// Production deployments plug a transport in here; tests use the in-memory
/// outbox to inspect what would have been sent.
pub trait MailSink {
    /// Delivers (or records) one outbound message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] when the message cannot be recorded.
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Cloneable shared handle over a [`MailSink`] implementation.
///
/// # Invariants
/// - All clones reference the same underlying sink.
#[derive(Clone)]
pub struct SharedMailSink {
    /// Shared sink implementation.
    inner: Arc<dyn MailSink + Send + Sync>,
}

impl SharedMailSink {
    /// Wraps a sink implementation in a shared handle.
    pub fn from_sink<S>(sink: S) -> Self
    where
        S: MailSink + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(sink),
        }
    }

    /// Wraps an existing shared sink implementation.
    #[must_use]
    pub fn from_arc(sink: Arc<dyn MailSink + Send + Sync>) -> Self {
        Self {
            inner: sink,
        }
    }
}

impl std::ops::Deref for SharedMailSink {
    type Target = dyn MailSink + Send + Sync;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
