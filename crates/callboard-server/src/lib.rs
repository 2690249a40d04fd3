// crates/callboard-server/src/lib.rs
// ============================================================================
// Module: Callboard Server
// Description: Axum HTTP server for the Callboard CFP service.
// Purpose: Expose the CFP domain as a server-rendered web application.
// Dependencies: axum, callboard-core, callboard-config, callboard-store-sqlite
// ============================================================================

//! ## Overview
//! The Callboard server renders the speaker-facing CFP surface: submission
//! lists and detail pages, the workflow actions (confirm, withdraw, edit),
//! profile and question forms, co-speaker invitations, and locale switching.
//! Authorization failures on foreign submissions surface as 404 so that
//! non-owners cannot observe a submission's existence, and disallowed
//! workflow transitions render success without persisting anything.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod handlers;
pub mod i18n;
pub mod pages;
pub mod server;
pub mod session;
pub mod telemetry;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use error::PageError;
pub use server::AppState;
pub use server::CallboardServer;
pub use server::ServerError;
pub use server::build_router;
pub use server::build_state;
