// system-tests/tests/locale.rs
// ============================================================================
// Module: Locale Suite
// Description: Locale switching, cookie handling, and persistence.
// Purpose: Verify locale resolution precedence end to end.
// Dependencies: helpers, reqwest, tokio
// ============================================================================

//! ## Overview
//! Drives the locale switch endpoint with a cookie-enabled client: the
//! switch sets the cookie, persists the choice on the speaker account, and
//! subsequent pages render in the chosen language.

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

use callboard_core::Locale;
use callboard_core::SubmissionState;
use helpers::fixtures::seed_event;
use helpers::fixtures::seed_speaker;
use helpers::fixtures::seed_submission;
use helpers::harness::bearer;
use helpers::harness::client;
use helpers::harness::spawn_server;
use reqwest::header::AUTHORIZATION;

#[tokio::test(flavor = "multi_thread")]
async fn switching_locale_renders_german_pages() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (speaker, token) = seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    seed_submission(&server.store, &event, "TALK01", SubmissionState::Submitted, &[speaker.id]);

    // The client follows the 303 and carries the freshly set cookie.
    let http = client();
    let response = http
        .get(server.url("/democon/locale/set?locale=de&next=/democon/me/submissions"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Einreichung"));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn switching_locale_persists_on_the_speaker() {
    let server = spawn_server().await.unwrap();
    seed_event(&server.store);
    let (speaker, token) = seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");

    let response = client()
        .get(server.url("/democon/locale/set?locale=de&next=/democon"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let stored = server.store.speaker(speaker.id).unwrap().unwrap();
    assert_eq!(stored.locale, Locale::De);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_preference_applies_without_the_cookie() {
    let server = spawn_server().await.unwrap();
    let event = seed_event(&server.store);
    let (speaker, token) = seed_speaker(&server.store, 1, "Jane", "jane@example.org", "jane");
    seed_submission(&server.store, &event, "TALK01", SubmissionState::Submitted, &[speaker.id]);

    let switch = client()
        .get(server.url("/democon/locale/set?locale=de&next=/democon"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(switch.status(), reqwest::StatusCode::OK);

    // A fresh client has no cookie; the stored preference must win.
    let response = client()
        .get(server.url("/democon/me/submissions"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Einreichung"));

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unsupported_locale_is_rejected() {
    let server = spawn_server().await.unwrap();
    seed_event(&server.store);

    let response = client()
        .get(server.url("/democon/locale/set?locale=fr&next=/democon"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn offsite_redirect_falls_back_to_the_landing_page() {
    let server = spawn_server().await.unwrap();
    seed_event(&server.store);

    let response = client()
        .get(server.url("/democon/locale/set?locale=de&next=https://evil.example/"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.url().path(), "/democon");

    server.shutdown().await;
}
