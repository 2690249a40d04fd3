// crates/callboard-core/src/lib.rs
// ============================================================================
// Module: Callboard Core
// Description: Domain model and interfaces for the Callboard CFP service.
// Purpose: Provide the submission workflow, speaker model, and store seams.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core domain types for Callboard, a Call-for-Papers web service. This crate
//! defines the submission state workflow, speaker profiles, per-event
//! questions, co-speaker invitations, and the backend-agnostic [`CfpStore`]
//! and [`MailSink`] interfaces together with in-memory implementations used
//! by tests and development servers.
//!
//! Disallowed workflow transitions are not errors: the guard reports them as
//! ignored and callers render success regardless. Storage backends must treat
//! persisted rows as untrusted on load and fail closed on malformed data.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod memory;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use core::event::Event;
pub use core::identifiers::EventId;
pub use core::identifiers::EventSlug;
pub use core::identifiers::InviteToken;
pub use core::identifiers::QuestionId;
pub use core::identifiers::SessionToken;
pub use core::identifiers::SpeakerId;
pub use core::identifiers::SubmissionCode;
pub use core::invitation::Invitation;
pub use core::locale::Locale;
pub use core::question::Answer;
pub use core::question::Question;
pub use core::question::QuestionVariant;
pub use core::session::Session;
pub use core::speaker::Speaker;
pub use core::speaker::SpeakerProfile;
pub use core::submission::Submission;
pub use core::submission::SubmissionContent;
pub use core::submission::SubmissionState;
pub use core::submission::Transition;
pub use interfaces::CfpStore;
pub use interfaces::MailError;
pub use interfaces::MailMessage;
pub use interfaces::MailSink;
pub use interfaces::SharedCfpStore;
pub use interfaces::SharedMailSink;
pub use interfaces::StoreError;
pub use memory::InMemoryCfpStore;
pub use memory::InMemoryOutbox;
