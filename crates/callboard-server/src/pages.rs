// crates/callboard-server/src/pages.rs
// ============================================================================
// Module: Page Rendering
// Description: Server-side HTML rendering for the speaker-facing pages.
// Purpose: Produce escaped, locale-aware markup without a template engine.
// Dependencies: callboard-core
// ============================================================================

//! ## Overview
//! All pages are rendered from plain Rust functions that return complete
//! HTML documents. Every value sourced from the store or from request input
//! passes through [`escape`] before interpolation. Rendering never touches
//! the store; handlers load data first and hand owned views to this module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use callboard_core::Event;
use callboard_core::Locale;
use callboard_core::Question;
use callboard_core::QuestionId;
use callboard_core::QuestionVariant;
use callboard_core::Speaker;
use callboard_core::Submission;

use crate::i18n::Message;
use crate::i18n::tr;

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for safe interpolation into HTML body and attribute positions.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Wraps a body fragment in the shared document shell.
#[must_use]
fn layout(locale: Locale, title: &str, body: &str) -> String {
    let lang = locale.as_str();
    let title = escape(title);
    format!(
        "<!doctype html>\n<html lang=\"{lang}\">\n<head><meta charset=\"utf-8\">\
         <title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

// ============================================================================
// SECTION: Pages
// ============================================================================

/// Renders the public event landing page.
#[must_use]
pub fn landing_page(locale: Locale, event: &Event) -> String {
    let name = escape(&event.name);
    let intro = tr(locale, Message::LandingIntro);
    let body = format!("<h1>{name}</h1>\n<p>{intro}</p>");
    layout(locale, &event.name, &body)
}

/// Renders the authenticated speaker's submission list.
#[must_use]
pub fn submission_list_page(locale: Locale, event: &Event, submissions: &[Submission]) -> String {
    let heading = tr(locale, Message::SubmissionsHeading);
    let slug = escape(event.slug.as_str());
    let mut body = format!("<h1>{heading}</h1>\n<ul>\n");
    for submission in submissions {
        let code = escape(submission.code.as_str());
        let title = escape(&submission.content.title);
        let state = submission.state.as_str();
        body.push_str(&format!(
            "<li><a href=\"/{slug}/submissions/{code}\">{title}</a> ({state})</li>\n"
        ));
    }
    body.push_str("</ul>");
    layout(locale, heading, &body)
}

/// Renders a single submission with its workflow actions and edit form.
#[must_use]
pub fn submission_page(locale: Locale, event: &Event, submission: &Submission) -> String {
    let heading = tr(locale, Message::SubmissionHeading);
    let slug = escape(event.slug.as_str());
    let code = escape(submission.code.as_str());
    let title = escape(&submission.content.title);
    let state = submission.state.as_str();
    let state_label = tr(locale, Message::StateLabel);
    let mut body = format!(
        "<h1>{heading}: {title}</h1>\n<p>{state_label}: <span class=\"state\">{state}</span></p>\n\
         <p><a href=\"/{slug}/submissions/{code}/confirm\">confirm</a>\n\
         <a href=\"/{slug}/submissions/{code}/withdraw\">withdraw</a>\n\
         <a href=\"/{slug}/submissions/{code}/invite\">invite</a></p>\n"
    );
    if submission.state.allows_edit() {
        body.push_str(&edit_form(locale, &slug, &code, submission));
    }
    layout(locale, &submission.content.title, &body)
}

/// Renders the content edit form for an editable submission.
#[must_use]
fn edit_form(locale: Locale, slug: &str, code: &str, submission: &Submission) -> String {
    let title_label = tr(locale, Message::TitleLabel);
    let abstract_label = tr(locale, Message::AbstractLabel);
    let description_label = tr(locale, Message::DescriptionLabel);
    let notes_label = tr(locale, Message::NotesLabel);
    let title = escape(&submission.content.title);
    let abstract_text = escape(&submission.content.abstract_text);
    let description = escape(&submission.content.description);
    let notes = escape(&submission.content.notes);
    let submission_type = escape(&submission.content.submission_type);
    let content_locale = submission.content.content_locale.as_str();
    format!(
        "<form method=\"post\" action=\"/{slug}/submissions/{code}\">\n\
         <label>{title_label}<input name=\"title\" value=\"{title}\"></label>\n\
         <label>{abstract_label}<textarea name=\"abstract\">{abstract_text}</textarea></label>\n\
         <label>{description_label}<textarea name=\"description\">{description}</textarea></label>\n\
         <label>{notes_label}<textarea name=\"notes\">{notes}</textarea></label>\n\
         <label>Type<input name=\"submission_type\" value=\"{submission_type}\"></label>\n\
         <label>Language<input name=\"content_locale\" value=\"{content_locale}\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>"
    )
}

/// Renders the co-speaker invite form for a submission.
#[must_use]
pub fn invite_page(locale: Locale, event: &Event, submission: &Submission) -> String {
    let heading = tr(locale, Message::InviteHeading);
    let slug = escape(event.slug.as_str());
    let code = escape(submission.code.as_str());
    let title = escape(&submission.content.title);
    let body = format!(
        "<h1>{heading}</h1>\n<p>{title}</p>\n\
         <form method=\"post\" action=\"/{slug}/submissions/{code}/invite\">\n\
         <label>Email<input name=\"speaker\" type=\"email\"></label>\n\
         <label>Subject<input name=\"subject\"></label>\n\
         <label>Text<textarea name=\"text\"></textarea></label>\n\
         <button type=\"submit\">Send</button>\n</form>"
    );
    layout(locale, heading, &body)
}

/// Renders the combined profile and question form.
#[must_use]
pub fn profile_page(
    locale: Locale,
    event: &Event,
    speaker: &Speaker,
    biography: &str,
    questions: &[Question],
    answers: &HashMap<QuestionId, String>,
) -> String {
    let heading = tr(locale, Message::ProfileHeading);
    let questions_heading = tr(locale, Message::QuestionsHeading);
    let slug = escape(event.slug.as_str());
    let name = escape(&speaker.name);
    let biography = escape(biography);
    let mut body = format!(
        "<h1>{heading}</h1>\n\
         <form method=\"post\" action=\"/{slug}/me\">\n\
         <input type=\"hidden\" name=\"form\" value=\"profile\">\n\
         <label>Name<input name=\"name\" value=\"{name}\"></label>\n\
         <label>Biography<textarea name=\"biography\">{biography}</textarea></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n"
    );
    if !questions.is_empty() {
        body.push_str(&format!(
            "<h2>{questions_heading}</h2>\n\
             <form method=\"post\" action=\"/{slug}/me\">\n\
             <input type=\"hidden\" name=\"form\" value=\"questions\">\n"
        ));
        for question in questions {
            let value = answers.get(&question.id).map(String::as_str).unwrap_or_default();
            body.push_str(&question_field(question, value));
        }
        body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/{slug}/me/delete\">\n\
         <input type=\"hidden\" name=\"really\" value=\"true\">\n\
         <button type=\"submit\">Delete my profile</button>\n</form>"
    ));
    layout(locale, heading, &body)
}

/// Renders one question input matching its variant.
///
/// Boolean questions render a checkbox posting the text value `True`; an
/// unchecked box is simply absent from the submitted form.
#[must_use]
fn question_field(question: &Question, value: &str) -> String {
    let prompt = escape(&question.prompt);
    let field = format!("question_{}", question.id.get());
    let value = escape(value);
    match question.variant {
        QuestionVariant::Text => {
            format!("<label>{prompt}<input name=\"{field}\" value=\"{value}\"></label>\n")
        }
        QuestionVariant::LongText => {
            format!("<label>{prompt}<textarea name=\"{field}\">{value}</textarea></label>\n")
        }
        QuestionVariant::Boolean => {
            let checked = match value.as_str() {
                "True" | "true" | "1" | "on" | "yes" => " checked",
                _ => "",
            };
            format!(
                "<label>{prompt}\
                 <input type=\"checkbox\" name=\"{field}\" value=\"True\"{checked}></label>\n"
            )
        }
    }
}

/// Renders a short confirmation notice.
#[must_use]
pub fn notice_page(locale: Locale, message: Message) -> String {
    let text = tr(locale, message);
    let body = format!("<p>{text}</p>");
    layout(locale, text, &body)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
