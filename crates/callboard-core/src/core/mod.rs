// crates/callboard-core/src/core/mod.rs
// ============================================================================
// Module: Callboard Domain Model
// Description: Domain types for events, submissions, speakers, and questions.
// Purpose: Group the CFP domain model under one module tree.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Domain model for the Callboard CFP service. Types here are plain data with
//! the workflow guard as the only behavior-bearing surface; persistence and
//! transport concerns live behind [`crate::interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod event;
pub mod identifiers;
pub mod invitation;
pub mod locale;
pub mod question;
pub mod session;
pub mod speaker;
pub mod submission;
