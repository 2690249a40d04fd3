// crates/callboard-store-sqlite/src/lib.rs
// ============================================================================
// Module: Callboard SQLite Store
// Description: Durable CfpStore backed by SQLite.
// Purpose: Persist the CFP domain across server restarts.
// Dependencies: callboard-core, rusqlite
// ============================================================================

//! ## Overview
//! Durable [`callboard_core::CfpStore`] implementation on `SQLite`. The store
//! runs in WAL mode by default, versions its schema, and fails closed when a
//! persisted row cannot be decoded into the domain model.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use store::SqliteCfpStore;
pub use store::SqliteOpenError;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
