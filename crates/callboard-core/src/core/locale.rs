// crates/callboard-core/src/core/locale.rs
// ============================================================================
// Module: Callboard Locales
// Description: Supported UI locales and their stable wire codes.
// Purpose: Provide a closed locale set for rendering and persistence.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Callboard renders pages in a closed set of locales. Locale codes are
//! stable on the wire (`en`, `de`) and in storage; unknown codes are rejected
//! at parse boundaries rather than defaulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Locale
// ============================================================================

/// UI locale for rendered pages and stored speaker preferences.
///
/// # Invariants
/// - Variants are stable for serialization and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// German.
    De,
}

impl Locale {
    /// Returns the stable locale code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Parses a locale code (returns `None` for unknown codes).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
