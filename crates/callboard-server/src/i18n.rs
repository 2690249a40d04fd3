// crates/callboard-server/src/i18n.rs
// ============================================================================
// Module: Localization Catalog
// Description: Static message catalog for rendered pages.
// Purpose: Provide locale-resolved UI strings for English and German.
// Dependencies: callboard-core
// ============================================================================

//! ## Overview
//! A closed, compile-time message catalog. Every user-facing string rendered
//! by [`crate::pages`] resolves through [`tr`], keyed by [`Message`] and the
//! request locale. Adding a locale means extending the match arms; there is
//! no runtime catalog loading.

// ============================================================================
// SECTION: Imports
// ============================================================================

use callboard_core::Locale;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message keys used by the page renderers.
///
/// # Invariants
/// - Every variant resolves in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Landing page intro paragraph.
    LandingIntro,
    /// Heading of the submission list.
    SubmissionsHeading,
    /// Heading of a single submission page.
    SubmissionHeading,
    /// Label of the workflow state field.
    StateLabel,
    /// Label of the title form field.
    TitleLabel,
    /// Label of the abstract form field.
    AbstractLabel,
    /// Label of the description form field.
    DescriptionLabel,
    /// Label of the notes form field.
    NotesLabel,
    /// Heading of the profile page.
    ProfileHeading,
    /// Heading of the question section.
    QuestionsHeading,
    /// Heading of the invite form.
    InviteHeading,
    /// Notice rendered after enqueueing an invitation.
    InviteSent,
    /// Notice rendered after accepting an invitation.
    InvitationAccepted,
    /// Notice rendered after profile deletion.
    ProfileDeleted,
    /// Generic saved notice.
    SavedNotice,
}

/// Resolves a message in the given locale.
#[must_use]
pub const fn tr(locale: Locale, message: Message) -> &'static str {
    match locale {
        Locale::En => match message {
            Message::LandingIntro => "Welcome! Hand in your submission before the deadline.",
            Message::SubmissionsHeading => "Your submissions",
            Message::SubmissionHeading => "Submission",
            Message::StateLabel => "State",
            Message::TitleLabel => "Title",
            Message::AbstractLabel => "Abstract",
            Message::DescriptionLabel => "Description",
            Message::NotesLabel => "Notes",
            Message::ProfileHeading => "Your profile",
            Message::QuestionsHeading => "We have some questions",
            Message::InviteHeading => "Invite a co-speaker",
            Message::InviteSent => "Your invitation was sent.",
            Message::InvitationAccepted => "You are now listed as a speaker.",
            Message::ProfileDeleted => "Your profile was deleted.",
            Message::SavedNotice => "Your changes were saved.",
        },
        Locale::De => match message {
            Message::LandingIntro => {
                "Willkommen! Reichen Sie Ihre Einreichung vor der Frist ein."
            }
            Message::SubmissionsHeading => "Ihre Einreichungen",
            Message::SubmissionHeading => "Einreichung",
            Message::StateLabel => "Status",
            Message::TitleLabel => "Titel",
            Message::AbstractLabel => "Zusammenfassung",
            Message::DescriptionLabel => "Beschreibung",
            Message::NotesLabel => "Notizen",
            Message::ProfileHeading => "Ihr Profil",
            Message::QuestionsHeading => "Wir haben ein paar Fragen",
            Message::InviteHeading => "Co-Speaker einladen",
            Message::InviteSent => "Ihre Einladung wurde versendet.",
            Message::InvitationAccepted => "Sie sind jetzt als Speaker eingetragen.",
            Message::ProfileDeleted => "Ihr Profil wurde gelöscht.",
            Message::SavedNotice => "Ihre Änderungen wurden gespeichert.",
        },
    }
}
