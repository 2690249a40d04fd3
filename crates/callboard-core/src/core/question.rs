// crates/callboard-core/src/core/question.rs
// ============================================================================
// Module: Callboard Questions
// Description: Per-event speaker questions and upserted answers.
// Purpose: Model custom CFP questions with uniform answer handling.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Events define custom questions for their speakers. Answers are stored as
//! text regardless of the question variant (boolean answers persist their
//! form value, e.g. `"True"`), and are upserted per (speaker, question):
//! created when absent, updated in place otherwise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EventId;
use crate::core::identifiers::QuestionId;
use crate::core::identifiers::SpeakerId;

// ============================================================================
// SECTION: Question
// ============================================================================

/// Question input variant.
///
/// # Invariants
/// - Variants are stable for serialization and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionVariant {
    /// Single-line free text.
    Text,
    /// Boolean rendered as a checkbox; answers persist as text.
    Boolean,
    /// Multi-line free text.
    LongText,
}

impl QuestionVariant {
    /// Returns the stable storage form of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::LongText => "long_text",
        }
    }

    /// Parses a stored variant string (returns `None` for unknown values).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "boolean" => Some(Self::Boolean),
            "long_text" => Some(Self::LongText),
            _ => None,
        }
    }
}

/// Custom speaker question defined by an event.
///
/// # Invariants
/// - `id` is unique across questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier.
    pub id: QuestionId,
    /// Event defining the question.
    pub event_id: EventId,
    /// Prompt shown to speakers.
    pub prompt: String,
    /// Input variant.
    pub variant: QuestionVariant,
}

// ============================================================================
// SECTION: Answer
// ============================================================================

/// A speaker's answer to an event question.
///
/// # Invariants
/// - At most one answer exists per (speaker, question) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answering speaker.
    pub speaker_id: SpeakerId,
    /// Question being answered.
    pub question_id: QuestionId,
    /// Answer value in its form representation.
    pub value: String,
}
