// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Callboard system-tests.
// Purpose: Provide the server harness and store fixtures.
// Dependencies: callboard-core, callboard-server, reqwest, tokio
// ============================================================================

//! ## Overview
//! Shared helpers for Callboard system-tests.
//! Purpose: Provide the loopback server harness and store-seam fixtures.
//! Invariants:
//! - Each suite spawns its own server on a fresh loopback port.
//! - Fixtures are seeded directly through the store; there is no signup flow.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod fixtures;
pub mod harness;
