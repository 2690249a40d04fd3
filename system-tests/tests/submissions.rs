// system-tests/tests/submissions.rs
// ============================================================================
// Module: Submission Suite
// Description: Submission listing, ownership policy, and content editing.
// Purpose: Verify owners see their talks and non-owners see 404.
// Dependencies: helpers, reqwest, tokio
// ============================================================================

//! ## Overview
//! Covers the submission pages: the authenticated list, the detail page with
//! its ownership policy (foreign and unknown codes are indistinguishable),
//! and content editing including the rejected-is-immutable rule.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod helpers;

use callboard_core::SubmissionCode;
use callboard_core::SubmissionState;
use helpers::fixtures::seed_event;
use helpers::fixtures::seed_speaker;
use helpers::fixtures::seed_submission;
use helpers::harness::bearer;
use helpers::harness::client;
use helpers::harness::spawn_server;
use reqwest::header::AUTHORIZATION;

#[tokio::test(flavor = "multi_thread")]
async fn submission_list_shows_only_own_talks() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (speaker, token) =
        seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    let (other, _) = seed_speaker(&server.store, 2, "Alex", "alex@example.org", "alex");
    seed_submission(&server.store, &event, "MINE42", SubmissionState::Submitted, &[speaker.id]);
    seed_submission(&server.store, &event, "THEIRS", SubmissionState::Submitted, &[other.id]);

    let response = client()
        .get(server.url("/democon/me/submissions"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("MINE42"));
    assert!(!body.contains("THEIRS"));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_list_renders_not_found() {
    let server = spawn_server().await.unwrap();
    seed_event(&server.store);

    let response = client().get(server.url("/democon/me/submissions")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_submission_renders_not_found() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (_, token) = seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    let (other, _) = seed_speaker(&server.store, 2, "Alex", "alex@example.org", "alex");
    seed_submission(&server.store, &event, "THEIRS", SubmissionState::Submitted, &[other.id]);

    let response = client()
        .get(server.url("/democon/submissions/THEIRS"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_code_renders_not_found() {
    let server = spawn_server().await.unwrap();
    seed_event(&server.store);
    let (_, token) = seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");

    let response = client()
        .get(server.url("/democon/submissions/NOPE"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn editing_updates_submission_content() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (speaker, token) =
        seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    seed_submission(&server.store, &event, "TALK01", SubmissionState::Submitted, &[speaker.id]);

    let response = client()
        .post(server.url("/democon/submissions/TALK01"))
        .header(AUTHORIZATION, bearer(&token))
        .form(&[
            ("title", "Ein ganz neuer Titel"),
            ("abstract", "New abstract."),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Ein ganz neuer Titel"));

    let stored = server
        .store
        .submission(event.id, &SubmissionCode::new("TALK01"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.content.title, "Ein ganz neuer Titel");
    assert_eq!(stored.content.abstract_text, "New abstract.");
    // Fields missing from the form keep their stored values.
    assert_eq!(stored.content.submission_type, "Talk");

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_submission_ignores_edits() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (speaker, token) =
        seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    seed_submission(&server.store, &event, "TALK01", SubmissionState::Rejected, &[speaker.id]);

    let response = client()
        .post(server.url("/democon/submissions/TALK01"))
        .header(AUTHORIZATION, bearer(&token))
        .form(&[("title", "Ein ganz neuer Titel")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let stored = server
        .store
        .submission(event.id, &SubmissionCode::new("TALK01"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.content.title, "A talk about talks");

    server.shutdown().await;
}
