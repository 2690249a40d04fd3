// crates/callboard-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite CFP Store
// Description: Durable CfpStore backed by SQLite WAL.
// Purpose: Persist events, speakers, submissions, answers, and sessions.
// Dependencies: callboard-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`CfpStore`] using `SQLite`. One
//! connection behind a mutex serves all calls, which matches the
//! request-scoped atomicity the interface requires. Database contents are
//! untrusted on load: rows that do not decode into the domain model are
//! reported as backend errors rather than silently defaulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use callboard_core::Answer;
use callboard_core::CfpStore;
use callboard_core::Event;
use callboard_core::EventId;
use callboard_core::EventSlug;
use callboard_core::Invitation;
use callboard_core::InviteToken;
use callboard_core::Locale;
use callboard_core::Question;
use callboard_core::QuestionId;
use callboard_core::QuestionVariant;
use callboard_core::Session;
use callboard_core::SessionToken;
use callboard_core::Speaker;
use callboard_core::SpeakerId;
use callboard_core::SpeakerProfile;
use callboard_core::StoreError;
use callboard_core::Submission;
use callboard_core::SubmissionCode;
use callboard_core::SubmissionContent;
use callboard_core::SubmissionState;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Table creation statements executed on open.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_meta (
    version INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    locales TEXT NOT NULL,
    default_locale TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS speakers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    nick TEXT NOT NULL,
    locale TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS profiles (
    speaker_id INTEGER NOT NULL,
    event_id INTEGER NOT NULL,
    biography TEXT NOT NULL,
    PRIMARY KEY (speaker_id, event_id)
);
CREATE TABLE IF NOT EXISTS submissions (
    event_id INTEGER NOT NULL,
    code TEXT NOT NULL,
    title TEXT NOT NULL,
    abstract_text TEXT NOT NULL,
    description TEXT NOT NULL,
    notes TEXT NOT NULL,
    submission_type TEXT NOT NULL,
    content_locale TEXT NOT NULL,
    state TEXT NOT NULL,
    PRIMARY KEY (event_id, code)
);
CREATE TABLE IF NOT EXISTS submission_speakers (
    event_id INTEGER NOT NULL,
    code TEXT NOT NULL,
    speaker_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (event_id, code, speaker_id)
);
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    event_id INTEGER NOT NULL,
    prompt TEXT NOT NULL,
    variant TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS answers (
    speaker_id INTEGER NOT NULL,
    question_id INTEGER NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (speaker_id, question_id)
);
CREATE TABLE IF NOT EXISTS invitations (
    token TEXT PRIMARY KEY,
    event_id INTEGER NOT NULL,
    code TEXT NOT NULL,
    email TEXT NOT NULL,
    subject TEXT NOT NULL,
    body TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    speaker_id INTEGER NOT NULL
);
";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` CFP store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Internal open/setup errors before the store is usable.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SqliteOpenError {
    /// Opening the database file failed.
    #[error("sqlite open failed: {0}")]
    Open(String),
    /// Applying pragmas or the schema failed.
    #[error("sqlite setup failed: {0}")]
    Setup(String),
    /// The database carries an unsupported schema version.
    #[error("unsupported schema version {found}, expected {expected}")]
    SchemaVersion {
        /// Version recorded in the database.
        found: i64,
        /// Version this build supports.
        expected: i64,
    },
}

/// Maps a rusqlite error to the interface error taxonomy.
fn map_sqlite_error(error: &rusqlite::Error) -> StoreError {
    match error {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StoreError::Constraint(error.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Durable [`CfpStore`] backed by `SQLite`.
///
/// # Invariants
/// - All calls serialize through one connection mutex.
#[derive(Debug)]
pub struct SqliteCfpStore {
    /// Guarded database connection.
    conn: Mutex<Connection>,
}

impl SqliteCfpStore {
    /// Opens (and if necessary initializes) the store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteOpenError`] when the database cannot be opened, set
    /// up, or carries an unsupported schema version.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteOpenError> {
        let conn = Connection::open(&config.path)
            .map_err(|err| SqliteOpenError::Open(err.to_string()))?;
        conn.pragma_update(None, "journal_mode", config.journal_mode.pragma_value())
            .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        conn.pragma_update(None, "synchronous", config.sync_mode.pragma_value())
            .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms.to_string())
            .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        conn.pragma_update(None, "foreign_keys", "on")
            .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        conn.execute_batch(SCHEMA_SQL).map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        let version: Option<i64> = conn
            .query_row("SELECT version FROM schema_meta LIMIT 1", [], |row| row.get(0))
            .optional()
            .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
        match version {
            Some(found) if found != SCHEMA_VERSION => {
                return Err(SqliteOpenError::SchemaVersion {
                    found,
                    expected: SCHEMA_VERSION,
                });
            }
            Some(_) => {}
            None => {
                conn.execute("INSERT INTO schema_meta (version) VALUES (?1)", [SCHEMA_VERSION])
                    .map_err(|err| SqliteOpenError::Setup(err.to_string()))?;
            }
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Locks the connection, mapping poisoning to a backend error.
    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Backend("connection mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Row Decoding
// ============================================================================

/// Converts a domain identifier into its storage form.
fn id_to_sql(raw: u64) -> Result<i64, StoreError> {
    i64::try_from(raw)
        .map_err(|_| StoreError::Constraint("identifier exceeds storage range".to_string()))
}

/// Decodes a stored identifier column.
fn id_from_sql(raw: i64) -> Result<u64, StoreError> {
    u64::try_from(raw).map_err(|_| StoreError::Backend("malformed identifier column".to_string()))
}

/// Decodes a stored speaker identifier.
fn speaker_id_from_sql(raw: i64) -> Result<SpeakerId, StoreError> {
    SpeakerId::from_raw(id_from_sql(raw)?)
        .ok_or_else(|| StoreError::Backend("malformed speaker identifier".to_string()))
}

/// Decodes a stored event identifier.
fn event_id_from_sql(raw: i64) -> Result<EventId, StoreError> {
    EventId::from_raw(id_from_sql(raw)?)
        .ok_or_else(|| StoreError::Backend("malformed event identifier".to_string()))
}

/// Decodes a stored question identifier.
fn question_id_from_sql(raw: i64) -> Result<QuestionId, StoreError> {
    QuestionId::from_raw(id_from_sql(raw)?)
        .ok_or_else(|| StoreError::Backend("malformed question identifier".to_string()))
}

/// Decodes a stored locale column.
fn locale_from_sql(raw: &str) -> Result<Locale, StoreError> {
    Locale::parse(raw).ok_or_else(|| StoreError::Backend(format!("malformed locale column: {raw}")))
}

/// Decodes a stored submission state column.
fn state_from_sql(raw: &str) -> Result<SubmissionState, StoreError> {
    SubmissionState::parse(raw)
        .ok_or_else(|| StoreError::Backend(format!("malformed state column: {raw}")))
}

/// Decodes a stored question variant column.
fn variant_from_sql(raw: &str) -> Result<QuestionVariant, StoreError> {
    QuestionVariant::parse(raw)
        .ok_or_else(|| StoreError::Backend(format!("malformed variant column: {raw}")))
}

/// Encodes the enabled-locale list for storage.
fn locales_to_sql(locales: &[Locale]) -> String {
    locales.iter().map(|locale| locale.as_str()).collect::<Vec<_>>().join(",")
}

/// Decodes the enabled-locale list from storage.
fn locales_from_sql(raw: &str) -> Result<Vec<Locale>, StoreError> {
    raw.split(',').filter(|code| !code.is_empty()).map(locale_from_sql).collect()
}

/// Raw submission row before speaker-set hydration.
struct SubmissionRow {
    /// Submission code.
    code: String,
    /// Event identifier.
    event_id: i64,
    /// Talk title.
    title: String,
    /// Short abstract.
    abstract_text: String,
    /// Long-form description.
    description: String,
    /// Organizer notes.
    notes: String,
    /// Submission type label.
    submission_type: String,
    /// Content locale code.
    content_locale: String,
    /// Workflow state string.
    state: String,
}

impl SubmissionRow {
    /// Reads a row from a `SELECT *`-ordered submissions query.
    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            event_id: row.get(0)?,
            code: row.get(1)?,
            title: row.get(2)?,
            abstract_text: row.get(3)?,
            description: row.get(4)?,
            notes: row.get(5)?,
            submission_type: row.get(6)?,
            content_locale: row.get(7)?,
            state: row.get(8)?,
        })
    }

    /// Decodes the row into the domain model with its speaker set.
    fn into_submission(self, speakers: Vec<SpeakerId>) -> Result<Submission, StoreError> {
        Ok(Submission {
            code: SubmissionCode::new(self.code),
            event_id: event_id_from_sql(self.event_id)?,
            content: SubmissionContent {
                title: self.title,
                abstract_text: self.abstract_text,
                description: self.description,
                notes: self.notes,
                submission_type: self.submission_type,
                content_locale: locale_from_sql(&self.content_locale)?,
            },
            state: state_from_sql(&self.state)?,
            speakers,
        })
    }
}

/// Loads the ordered speaker set of a submission.
fn load_speaker_set(
    conn: &Connection,
    event_id: i64,
    code: &str,
) -> Result<Vec<SpeakerId>, StoreError> {
    let mut statement = conn
        .prepare(
            "SELECT speaker_id FROM submission_speakers \
             WHERE event_id = ?1 AND code = ?2 ORDER BY position",
        )
        .map_err(|err| map_sqlite_error(&err))?;
    let rows = statement
        .query_map(params![event_id, code], |row| row.get::<_, i64>(0))
        .map_err(|err| map_sqlite_error(&err))?;
    let mut speakers = Vec::new();
    for row in rows {
        let raw = row.map_err(|err| map_sqlite_error(&err))?;
        speakers.push(speaker_id_from_sql(raw)?);
    }
    Ok(speakers)
}

// ============================================================================
// SECTION: CfpStore Implementation
// ============================================================================

impl CfpStore for SqliteCfpStore {
    fn insert_event(&self, event: &Event) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO events (id, slug, name, locales, default_locale) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id_to_sql(event.id.get())?,
                event.slug.as_str(),
                event.name,
                locales_to_sql(&event.locales),
                event.default_locale.as_str(),
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn event_by_slug(&self, slug: &EventSlug) -> Result<Option<Event>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, slug, name, locales, default_locale FROM events WHERE slug = ?1",
                params![slug.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        match row {
            Some((id, slug, name, locales, default_locale)) => Ok(Some(Event {
                id: event_id_from_sql(id)?,
                slug: EventSlug::new(slug),
                name,
                locales: locales_from_sql(&locales)?,
                default_locale: locale_from_sql(&default_locale)?,
            })),
            None => Ok(None),
        }
    }

    fn insert_speaker(&self, speaker: &Speaker) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO speakers (id, name, email, nick, locale) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id_to_sql(speaker.id.get())?,
                speaker.name,
                speaker.email,
                speaker.nick,
                speaker.locale.as_str(),
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn speaker(&self, id: SpeakerId) -> Result<Option<Speaker>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, name, email, nick, locale FROM speakers WHERE id = ?1",
                params![id_to_sql(id.get())?],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        match row {
            Some((id, name, email, nick, locale)) => Ok(Some(Speaker {
                id: speaker_id_from_sql(id)?,
                name,
                email,
                nick,
                locale: locale_from_sql(&locale)?,
            })),
            None => Ok(None),
        }
    }

    fn update_speaker(&self, speaker: &Speaker) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE speakers SET name = ?2, email = ?3, nick = ?4, locale = ?5 WHERE id = ?1",
                params![
                    id_to_sql(speaker.id.get())?,
                    speaker.name,
                    speaker.email,
                    speaker.nick,
                    speaker.locale.as_str(),
                ],
            )
            .map_err(|err| map_sqlite_error(&err))?;
        if changed == 0 {
            return Err(StoreError::Missing("speaker"));
        }
        Ok(())
    }

    fn upsert_profile(&self, profile: &SpeakerProfile) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO profiles (speaker_id, event_id, biography) VALUES (?1, ?2, ?3) \
             ON CONFLICT (speaker_id, event_id) DO UPDATE SET biography = excluded.biography",
            params![
                id_to_sql(profile.speaker_id.get())?,
                id_to_sql(profile.event_id.get())?,
                profile.biography,
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn profile(
        &self,
        speaker_id: SpeakerId,
        event_id: EventId,
    ) -> Result<Option<SpeakerProfile>, StoreError> {
        let conn = self.conn()?;
        let biography = conn
            .query_row(
                "SELECT biography FROM profiles WHERE speaker_id = ?1 AND event_id = ?2",
                params![id_to_sql(speaker_id.get())?, id_to_sql(event_id.get())?],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        Ok(biography.map(|biography| SpeakerProfile {
            speaker_id,
            event_id,
            biography,
        }))
    }

    fn clear_profile_biographies(&self, speaker_id: SpeakerId) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE profiles SET biography = '' WHERE speaker_id = ?1",
            params![id_to_sql(speaker_id.get())?],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO submissions (event_id, code, title, abstract_text, description, notes, \
             submission_type, content_locale, state) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id_to_sql(submission.event_id.get())?,
                submission.code.as_str(),
                submission.content.title,
                submission.content.abstract_text,
                submission.content.description,
                submission.content.notes,
                submission.content.submission_type,
                submission.content.content_locale.as_str(),
                submission.state.as_str(),
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        for (position, speaker_id) in submission.speakers.iter().enumerate() {
            conn.execute(
                "INSERT INTO submission_speakers (event_id, code, speaker_id, position) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    id_to_sql(submission.event_id.get())?,
                    submission.code.as_str(),
                    id_to_sql(speaker_id.get())?,
                    i64::try_from(position).map_err(|_| {
                        StoreError::Constraint("speaker set exceeds storage range".to_string())
                    })?,
                ],
            )
            .map_err(|err| map_sqlite_error(&err))?;
        }
        Ok(())
    }

    fn submission(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
    ) -> Result<Option<Submission>, StoreError> {
        let conn = self.conn()?;
        let event_raw = id_to_sql(event_id.get())?;
        let row = conn
            .query_row(
                "SELECT event_id, code, title, abstract_text, description, notes, \
                 submission_type, content_locale, state FROM submissions \
                 WHERE event_id = ?1 AND code = ?2",
                params![event_raw, code.as_str()],
                SubmissionRow::from_row,
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        match row {
            Some(row) => {
                let speakers = load_speaker_set(&conn, event_raw, code.as_str())?;
                Ok(Some(row.into_submission(speakers)?))
            }
            None => Ok(None),
        }
    }

    fn submissions_for_speaker(
        &self,
        event_id: EventId,
        speaker_id: SpeakerId,
    ) -> Result<Vec<Submission>, StoreError> {
        let conn = self.conn()?;
        let event_raw = id_to_sql(event_id.get())?;
        let mut statement = conn
            .prepare(
                "SELECT s.event_id, s.code, s.title, s.abstract_text, s.description, s.notes, \
                 s.submission_type, s.content_locale, s.state \
                 FROM submissions s JOIN submission_speakers ss \
                 ON s.event_id = ss.event_id AND s.code = ss.code \
                 WHERE s.event_id = ?1 AND ss.speaker_id = ?2 ORDER BY s.code",
            )
            .map_err(|err| map_sqlite_error(&err))?;
        let rows = statement
            .query_map(params![event_raw, id_to_sql(speaker_id.get())?], SubmissionRow::from_row)
            .map_err(|err| map_sqlite_error(&err))?;
        let mut decoded = Vec::new();
        for row in rows {
            decoded.push(row.map_err(|err| map_sqlite_error(&err))?);
        }
        drop(statement);
        let mut submissions = Vec::new();
        for row in decoded {
            let speakers = load_speaker_set(&conn, row.event_id, &row.code)?;
            submissions.push(row.into_submission(speakers)?);
        }
        Ok(submissions)
    }

    fn update_submission_content(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        content: &SubmissionContent,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE submissions SET title = ?3, abstract_text = ?4, description = ?5, \
                 notes = ?6, submission_type = ?7, content_locale = ?8 \
                 WHERE event_id = ?1 AND code = ?2",
                params![
                    id_to_sql(event_id.get())?,
                    code.as_str(),
                    content.title,
                    content.abstract_text,
                    content.description,
                    content.notes,
                    content.submission_type,
                    content.content_locale.as_str(),
                ],
            )
            .map_err(|err| map_sqlite_error(&err))?;
        if changed == 0 {
            return Err(StoreError::Missing("submission"));
        }
        Ok(())
    }

    fn update_submission_state(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        state: SubmissionState,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE submissions SET state = ?3 WHERE event_id = ?1 AND code = ?2",
                params![id_to_sql(event_id.get())?, code.as_str(), state.as_str()],
            )
            .map_err(|err| map_sqlite_error(&err))?;
        if changed == 0 {
            return Err(StoreError::Missing("submission"));
        }
        Ok(())
    }

    fn add_submission_speaker(
        &self,
        event_id: EventId,
        code: &SubmissionCode,
        speaker_id: SpeakerId,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let event_raw = id_to_sql(event_id.get())?;
        let exists = conn
            .query_row(
                "SELECT 1 FROM submissions WHERE event_id = ?1 AND code = ?2",
                params![event_raw, code.as_str()],
                |_| Ok(()),
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        if exists.is_none() {
            return Err(StoreError::Missing("submission"));
        }
        conn.execute(
            "INSERT OR IGNORE INTO submission_speakers (event_id, code, speaker_id, position) \
             SELECT ?1, ?2, ?3, COALESCE(MAX(position) + 1, 0) \
             FROM submission_speakers WHERE event_id = ?1 AND code = ?2",
            params![event_raw, code.as_str(), id_to_sql(speaker_id.get())?],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn insert_question(&self, question: &Question) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO questions (id, event_id, prompt, variant) VALUES (?1, ?2, ?3, ?4)",
            params![
                id_to_sql(question.id.get())?,
                id_to_sql(question.event_id.get())?,
                question.prompt,
                question.variant.as_str(),
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn questions_for_event(&self, event_id: EventId) -> Result<Vec<Question>, StoreError> {
        let conn = self.conn()?;
        let mut statement = conn
            .prepare(
                "SELECT id, event_id, prompt, variant FROM questions \
                 WHERE event_id = ?1 ORDER BY id",
            )
            .map_err(|err| map_sqlite_error(&err))?;
        let rows = statement
            .query_map(params![id_to_sql(event_id.get())?], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|err| map_sqlite_error(&err))?;
        let mut questions = Vec::new();
        for row in rows {
            let (id, event_raw, prompt, variant) = row.map_err(|err| map_sqlite_error(&err))?;
            questions.push(Question {
                id: question_id_from_sql(id)?,
                event_id: event_id_from_sql(event_raw)?,
                prompt,
                variant: variant_from_sql(&variant)?,
            });
        }
        Ok(questions)
    }

    fn upsert_answer(&self, answer: &Answer) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO answers (speaker_id, question_id, value) VALUES (?1, ?2, ?3) \
             ON CONFLICT (speaker_id, question_id) DO UPDATE SET value = excluded.value",
            params![
                id_to_sql(answer.speaker_id.get())?,
                id_to_sql(answer.question_id.get())?,
                answer.value,
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn answer(
        &self,
        speaker_id: SpeakerId,
        question_id: QuestionId,
    ) -> Result<Option<Answer>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM answers WHERE speaker_id = ?1 AND question_id = ?2",
                params![id_to_sql(speaker_id.get())?, id_to_sql(question_id.get())?],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        Ok(value.map(|value| Answer {
            speaker_id,
            question_id,
            value,
        }))
    }

    fn insert_invitation(&self, invitation: &Invitation) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO invitations (token, event_id, code, email, subject, body) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                invitation.token.as_str(),
                id_to_sql(invitation.event_id.get())?,
                invitation.submission.as_str(),
                invitation.email,
                invitation.subject,
                invitation.text,
            ],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn invitation(&self, token: &InviteToken) -> Result<Option<Invitation>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT event_id, code, email, subject, body FROM invitations WHERE token = ?1",
                params![token.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        match row {
            Some((event_raw, code, email, subject, text)) => Ok(Some(Invitation {
                token: token.clone(),
                event_id: event_id_from_sql(event_raw)?,
                submission: SubmissionCode::new(code),
                email,
                subject,
                text,
            })),
            None => Ok(None),
        }
    }

    fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (token, speaker_id) VALUES (?1, ?2)",
            params![session.token.as_str(), id_to_sql(session.speaker_id.get())?],
        )
        .map_err(|err| map_sqlite_error(&err))?;
        Ok(())
    }

    fn session_speaker(&self, token: &SessionToken) -> Result<Option<SpeakerId>, StoreError> {
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                "SELECT speaker_id FROM sessions WHERE token = ?1",
                params![token.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(|err| map_sqlite_error(&err))?;
        match raw {
            Some(raw) => Ok(Some(speaker_id_from_sql(raw)?)),
            None => Ok(None),
        }
    }
}
