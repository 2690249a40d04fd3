// crates/callboard-server/src/error.rs
// ============================================================================
// Module: Page Errors
// Description: Handler error type and its HTTP mapping.
// Purpose: Keep the outward error taxonomy to 404, 400, and 500.
// Dependencies: axum, callboard-core, thiserror
// ============================================================================

//! ## Overview
//! Handlers return [`PageError`] for everything that is an actual error.
//! Ownership failures map to 404 so non-owners cannot observe a submission's
//! existence; malformed forms map to 400; backend failures map to 500 with a
//! generic body. Disallowed workflow transitions never reach this type: they
//! render success.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use callboard_core::MailError;
use callboard_core::StoreError;
use thiserror::Error;

// ============================================================================
// SECTION: Page Error
// ============================================================================

/// Error surface of the page handlers.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PageError {
    /// The requested resource does not exist for this requester.
    #[error("not found")]
    NotFound,
    /// The request payload is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The mail sink failed.
    #[error(transparent)]
    Mail(#[from] MailError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>".to_string())).into_response()
            }
            Self::BadRequest(message) => {
                let message = crate::pages::escape(&message);
                (StatusCode::BAD_REQUEST, Html(format!("<h1>Bad request</h1><p>{message}</p>")))
                    .into_response()
            }
            Self::Store(_) | Self::Mail(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal server error</h1>".to_string()),
            )
                .into_response(),
        }
    }
}
