// system-tests/src/lib.rs
// ============================================================================
// Module: Callboard System Tests Library
// Description: Crate root for the Callboard system-test suites.
// Purpose: Anchor the test-only crate; shared helpers live under tests/.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate exists to host the system-test suites in `system-tests/tests`.
//! The suites spawn a real Callboard server on a loopback port and drive it
//! through an HTTP client; shared harness and fixture code lives in the
//! `tests/helpers` module tree.
