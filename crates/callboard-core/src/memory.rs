// crates/callboard-core/src/memory.rs
// ============================================================================
// Module: In-Memory Backends
// Description: In-memory CfpStore and mail outbox implementations.
// Purpose: Back tests and development servers without external state.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! In-memory implementations of the [`CfpStore`] and [`MailSink`] seams. The
//! store keeps every table behind a single mutex, which gives each call the
//! request-scoped atomicity the interfaces require. The outbox records
//! messages for inspection instead of transmitting them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

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
use crate::interfaces::CfpStore;
use crate::interfaces::MailError;
use crate::interfaces::MailMessage;
use crate::interfaces::MailSink;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Tables
// ============================================================================

/// In-memory table set guarded by one mutex.
#[derive(Debug, Default)]
struct Tables {
    /// Events keyed by identifier.
    events: HashMap<EventId, Event>,
    /// Speakers keyed by identifier.
    speakers: HashMap<SpeakerId, Speaker>,
    /// Profiles keyed by (speaker, event).
    profiles: HashMap<(SpeakerId, EventId), SpeakerProfile>,
    /// Submissions keyed by (event, code).
    submissions: HashMap<(EventId, SubmissionCode), Submission>,
    /// Questions keyed by identifier.
    questions: HashMap<QuestionId, Question>,
    /// Answers keyed by (speaker, question).
    answers: HashMap<(SpeakerId, QuestionId), Answer>,
    /// Invitations keyed by token.
    invitations: HashMap<InviteToken, Invitation>,
    /// Sessions keyed by token.
    sessions: HashMap<SessionToken, SpeakerId>,
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory [`CfpStore`] for tests and development servers.
///
/// # Invariants
/// - All tables share one mutex; each call observes a consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCfpStore {
    /// Guarded table set.
    tables: Mutex<Tables>,
}

impl InMemoryCfpStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the table set, mapping poisoning to a backend error.
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }
}

impl CfpStore for InMemoryCfpStore {
    fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.events.values().any(|existing| existing.slug == event.slug) {
            return Err(StoreError::Constraint(format!("duplicate event slug {}", event.slug)));
        }
        tables.events.insert(event.id, event.clone());
        Ok(())
    }

    fn event_by_slug(&self, slug: &EventSlug) -> Result<Option<Event>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.events.values().find(|event| &event.slug == slug).cloned())
    }

    fn insert_speaker(&self, speaker: &Speaker) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.speakers.contains_key(&speaker.id) {
            return Err(StoreError::Constraint(format!("duplicate speaker id {}", speaker.id)));
        }
        tables.speakers.insert(speaker.id, speaker.clone());
        Ok(())
    }

    fn speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.speakers.get(&id).cloned())
    }

    fn update_speaker(&self, speaker: &Speaker) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        match tables.speakers.get_mut(&speaker.id) {
            Some(existing) => {
                *existing = speaker.clone();
                Ok(())
            }
            None => Err(StoreError::Missing("speaker")),
        }
    }

    fn upsert_profile(&self, profile: &SpeakerProfile) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.profiles.insert((profile.speaker_id, profile.event_id), profile.clone());
        Ok(())
    }

    fn profile(
        &self,
        speaker_id: SpeakerId,
        event_id: EventId,
    ) -> Result<Option<SpeakerProfile>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.profiles.get(&(speaker_id, event_id)).cloned())
    }

    fn clear_profile_biographies(&self, speaker_id: SpeakerId) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        for profile in tables.profiles.values_mut() {
            if profile.speaker_id == speaker_id {
                profile.biography.clear();
            }
        }
        Ok(())
    }

    fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let key = (submission.event_id, submission.code.clone());
        if tables.submissions.contains_key(&key) {
            return Err(StoreError::Constraint(format!(
                "duplicate submission code {}",
                submission.code
            )));
        }
        tables.submissions.insert(key, submission.clone());
        Ok(())
    }

    fn submission(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
    ) -> Result<Option<Submission>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.submissions.get(&(event_id, code.clone())).cloned())
    }

    fn submissions_for_speaker(
        &self,
        event_id: EventId,
        speaker_id: SpeakerId,
    ) -> Result<Vec<Submission>, StoreError> {
        let tables = self.lock()?;
        let mut matches: Vec<Submission> = tables
            .submissions
            .values()
            .filter(|submission| {
                submission.event_id == event_id && submission.is_owned_by(speaker_id)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(matches)
    }

    fn update_submission_content(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        content: &SubmissionContent,
    ) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        match tables.submissions.get_mut(&(event_id, code.clone())) {
            Some(submission) => {
                submission.content = content.clone();
                Ok(())
            }
            None => Err(StoreError::Missing("submission")),
        }
    }

    fn update_submission_state(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        state: SubmissionState,
    ) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        match tables.submissions.get_mut(&(event_id, code.clone())) {
            Some(submission) => {
                submission.state = state;
                Ok(())
            }
            None => Err(StoreError::Missing("submission")),
        }
    }

    fn add_submission_speaker(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        speaker_id: SpeakerId,
    ) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        match tables.submissions.get_mut(&(event_id, code.clone())) {
            Some(submission) => {
                if !submission.is_owned_by(speaker_id) {
                    submission.speakers.push(speaker_id);
                }
                Ok(())
            }
            None => Err(StoreError::Missing("submission")),
        }
    }

    fn insert_question(&self, question: &Question) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.questions.contains_key(&question.id) {
            return Err(StoreError::Constraint(format!("duplicate question id {}", question.id)));
        }
        tables.questions.insert(question.id, question.clone());
        Ok(())
    }

    fn questions_for_event(&self, event_id: EventId) -> Result<Vec<Question>, StoreError> {
        let tables = self.lock()?;
        let mut matches: Vec<Question> = tables
            .questions
            .values()
            .filter(|question| question.event_id == event_id)
            .cloned()
            .collect();
        matches.sort_by_key(|question| question.id);
        Ok(matches)
    }

    fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.answers.insert((answer.speaker_id, answer.question_id), answer.clone());
        Ok(())
    }

    fn answer(
        &self,
        speaker_id: SpeakerId,
        question_id: QuestionId,
    ) -> Result<Option<Answer>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.answers.get(&(speaker_id, question_id)).cloned())
    }

    fn insert_invitation(&self, invitation: &Invitation) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.invitations.contains_key(&invitation.token) {
            return Err(StoreError::Constraint("duplicate invitation token".to_string()));
        }
        tables.invitations.insert(invitation.token.clone(), invitation.clone());
        Ok(())
    }

    fn invitation(&self, token: &InviteToken) -> Result<Option<Invitation>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.invitations.get(token).cloned())
    }

    fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.sessions.contains_key(&session.token) {
            return Err(StoreError::Constraint("duplicate session token".to_string()));
        }
        tables.sessions.insert(session.token.clone(), session.speaker_id);
        Ok(())
    }

    fn session_speaker(&self, token: &SessionToken) -> Result<Option<SpeakerId>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.sessions.get(token).copied())
    }
}

// ============================================================================
// SECTION: In-Memory Outbox
// ============================================================================

/// In-memory [`MailSink`] recording messages for inspection.
///
/// # Invariants
/// - Messages are appended in delivery order and never transmitted.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    /// Recorded messages in delivery order.
    messages: Mutex<Vec<MailMessage>>,
}

impl InMemoryOutbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded messages.
    #[must_use]
    pub fn messages(&self) -> Vec<MailMessage> {
        self.messages.lock().map_or_else(|_| Vec::new(), |messages| messages.clone())
    }
}

impl MailSink for InMemoryOutbox {
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| MailError::Sink("outbox mutex poisoned".to_string()))?;
        messages.push(message.clone());
        Ok(())
    }
}
