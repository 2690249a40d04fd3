// crates/callboard-config/src/lib.rs
// ============================================================================
// Module: Callboard Config
// Description: Configuration model, TOML loading, and validation.
// Purpose: Provide one validated configuration surface for the server.
// Dependencies: callboard-core, callboard-store-sqlite, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the Callboard server: bind address and body limits,
//! store backend selection, mail sink selection, and CFP defaults. Loading is
//! strict and fail-closed: oversized files, non-UTF-8 payloads, and unknown
//! keys are rejected before the server starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::CallboardConfig;
pub use config::CfpConfig;
pub use config::ConfigError;
pub use config::MailConfig;
pub use config::MailSinkType;
pub use config::ServerConfig;
pub use config::StoreConfig;
pub use config::StoreType;
