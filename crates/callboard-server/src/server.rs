// crates/callboard-server/src/server.rs
// ============================================================================
// Module: Server Assembly
// Description: Router construction, shared state, and the serve loop.
// Purpose: Wire configuration, store, mail sink, and handlers into a server.
// Dependencies: axum, callboard-config, callboard-core, callboard-store-sqlite, tokio
// ============================================================================

//! ## Overview
//! Assembly is split so tests can reuse the pieces: [`build_state`] wires the
//! collaborators, [`build_router`] mounts the routes and middleware, and
//! [`CallboardServer`] owns the bind-and-serve loop driven by configuration.
//! The metrics middleware records one counter and one latency observation per
//! request, labeled by method, path, and status class.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use callboard_config::CallboardConfig;
use callboard_config::MailConfig;
use callboard_config::MailSinkType;
use callboard_config::StoreConfig;
use callboard_config::StoreType;
use callboard_core::InMemoryCfpStore;
use callboard_core::InMemoryOutbox;
use callboard_core::Locale;
use callboard_core::MailError;
use callboard_core::MailMessage;
use callboard_core::MailSink;
use callboard_core::SharedCfpStore;
use callboard_core::SharedMailSink;
use callboard_store_sqlite::SqliteCfpStore;
use callboard_store_sqlite::SqliteOpenError;
use callboard_store_sqlite::SqliteStoreConfig;
use thiserror::Error;

use crate::handlers;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestMetrics;
use crate::telemetry::RequestOutcome;

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// Startup and serve-loop errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address does not parse.
    #[error("invalid bind address: {0}")]
    InvalidBind(String),
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(std::io::Error),
    /// The serve loop failed.
    #[error("server i/o failure: {0}")]
    Serve(std::io::Error),
    /// The `SQLite` store could not be opened.
    #[error(transparent)]
    StoreOpen(#[from] SqliteOpenError),
    /// The store configuration selects `SQLite` without a path.
    #[error("sqlite store requires a path")]
    MissingStorePath,
}

// ============================================================================
// SECTION: Application State
// ============================================================================

/// Shared state handed to every handler.
///
/// # Invariants
/// - All clones reference the same store, mail sink, and metrics sink.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend.
    pub store: SharedCfpStore,
    /// Outbound mail sink.
    pub mail: SharedMailSink,
    /// Request metrics sink.
    pub metrics: Arc<dyn RequestMetrics>,
    /// Locale used for pages rendered outside any event scope.
    pub default_locale: Locale,
}

/// Wires collaborators into the shared application state.
#[must_use]
pub fn build_state(
    store: SharedCfpStore,
    mail: SharedMailSink,
    metrics: Arc<dyn RequestMetrics>,
    default_locale: Locale,
) -> AppState {
    AppState {
        store,
        mail,
        metrics,
        default_locale,
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Mounts the page routes, the metrics middleware, and the body limit.
#[must_use]
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let metrics_state = state.clone();
    Router::new()
        .route("/{event}", get(handlers::submissions::landing))
        .route(
            "/{event}/me",
            get(handlers::profile::show).post(handlers::profile::update),
        )
        .route("/{event}/me/delete", post(handlers::profile::delete))
        .route("/{event}/me/submissions", get(handlers::submissions::list))
        .route("/{event}/locale/set", get(handlers::locale::set))
        .route(
            "/{event}/submissions/{code}",
            get(handlers::submissions::view).post(handlers::submissions::edit),
        )
        .route(
            "/{event}/submissions/{code}/confirm",
            get(handlers::submissions::confirm),
        )
        .route(
            "/{event}/submissions/{code}/withdraw",
            get(handlers::submissions::withdraw),
        )
        .route(
            "/{event}/submissions/{code}/invite",
            get(handlers::invite::form).post(handlers::invite::send),
        )
        .route("/{event}/invitation/{token}", post(handlers::invite::accept))
        .layer(middleware::from_fn_with_state(metrics_state, record_metrics))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Records one counter and one latency observation per request.
async fn record_metrics(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let outcome = if status.is_server_error() {
        RequestOutcome::Error
    } else {
        RequestOutcome::Ok
    };
    let event = RequestMetricEvent {
        method,
        path,
        status: status.as_u16(),
        outcome,
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, start.elapsed());
    response
}

// ============================================================================
// SECTION: Mail Sinks
// ============================================================================

/// Mail sink that prints outbound messages to standard error.
///
/// # Invariants
/// - Messages are not persisted; this sink is for local operation only.
pub struct StderrMailSink;

impl MailSink for StderrMailSink {
    #[allow(clippy::print_stderr, reason = "This sink's purpose is stderr output.")]
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError> {
        eprintln!(
            "mail to={} subject={}\n{}",
            message.to.join(","),
            message.subject,
            message.text
        );
        Ok(())
    }
}

// ============================================================================
// SECTION: Collaborator Construction
// ============================================================================

/// Builds the persistence backend selected by configuration.
///
/// # Errors
///
/// Returns [`ServerError`] when the `SQLite` store cannot be opened or the
/// configuration selects `SQLite` without a path.
pub fn build_store(config: &StoreConfig) -> Result<SharedCfpStore, ServerError> {
    match config.store_type {
        StoreType::Memory => Ok(SharedCfpStore::from_store(InMemoryCfpStore::new())),
        StoreType::Sqlite => {
            let path = config.path.clone().ok_or(ServerError::MissingStorePath)?;
            let store = SqliteCfpStore::new(&SqliteStoreConfig {
                path,
                busy_timeout_ms: config.busy_timeout_ms,
                journal_mode: config.journal_mode,
                sync_mode: config.sync_mode,
            })?;
            Ok(SharedCfpStore::from_store(store))
        }
    }
}

/// Builds the mail sink selected by configuration.
#[must_use]
pub fn build_mail_sink(config: &MailConfig) -> SharedMailSink {
    match config.sink {
        MailSinkType::Outbox => SharedMailSink::from_sink(InMemoryOutbox::new()),
        MailSinkType::Stderr => SharedMailSink::from_sink(StderrMailSink),
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Configured Callboard server.
pub struct CallboardServer {
    /// Validated configuration driving assembly.
    config: CallboardConfig,
}

impl CallboardServer {
    /// Creates a server from a validated configuration.
    #[must_use]
    pub const fn from_config(config: CallboardConfig) -> Self {
        Self {
            config,
        }
    }

    /// Binds the configured address and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when assembly, binding, or the serve loop
    /// fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| ServerError::InvalidBind(self.config.server.bind.clone()))?;
        let store = build_store(&self.config.store)?;
        let mail = build_mail_sink(&self.config.mail);
        let state = build_state(
            store,
            mail,
            Arc::new(NoopMetrics),
            self.config.cfp.default_locale,
        );
        let router = build_router(state, self.config.server.max_body_bytes);
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
        axum::serve(listener, router).await.map_err(ServerError::Serve)
    }
}
