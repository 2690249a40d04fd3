// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Callboard Server Harness
// Description: Helpers for spawning Callboard servers in system-tests.
// Purpose: Provide deterministic server startup and teardown for tests.
// Dependencies: axum, callboard-core, callboard-server, callboard-store-sqlite,
//               reqwest, tempfile, tokio
// ============================================================================

use std::net::SocketAddr;
use std::net::TcpListener;
use std::sync::Arc;

use callboard_core::InMemoryCfpStore;
use callboard_core::InMemoryOutbox;
use callboard_core::Locale;
use callboard_core::SharedCfpStore;
use callboard_core::SharedMailSink;
use callboard_server::build_router;
use callboard_server::build_state;
use callboard_server::telemetry::NoopMetrics;
use callboard_store_sqlite::SqliteCfpStore;
use callboard_store_sqlite::SqliteStoreConfig;
use callboard_store_sqlite::SqliteStoreMode;
use callboard_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Body limit applied to spawned test servers.
const TEST_MAX_BODY_BYTES: usize = 256 * 1024;

/// Busy timeout applied to sqlite-backed test servers (ms).
const TEST_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Handle for a spawned Callboard server.
pub struct SpawnedServer {
    /// Base URL of the spawned server.
    base_url: String,
    /// Store backing the server, for fixture seeding and direct assertions.
    pub store: SharedCfpStore,
    /// Outbox backing the server's mail sink, for delivery assertions.
    pub outbox: Arc<InMemoryOutbox>,
    /// Server task handle, aborted on shutdown.
    join: JoinHandle<()>,
    /// Working directory of an on-disk store; kept alive with the server.
    workdir: Option<TempDir>,
}

impl SpawnedServer {
    /// Returns an absolute URL for a server path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Shuts down the server task.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
        drop(self.workdir);
    }
}

// Intentionally no Drop impl: allow runtime shutdown to cleanly tear down servers.

/// Returns a free loopback address for test servers.
pub fn allocate_bind_addr() -> Result<SocketAddr, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))?;
    drop(listener);
    Ok(addr)
}

/// Spawns a server over the given store on a fresh loopback port.
async fn spawn_with_store(
    store: SharedCfpStore,
    workdir: Option<TempDir>,
) -> Result<SpawnedServer, String> {
    let addr = allocate_bind_addr()?;
    let outbox = Arc::new(InMemoryOutbox::new());
    let mail = SharedMailSink::from_arc(outbox.clone());
    let state = build_state(store.clone(), mail, Arc::new(NoopMetrics), Locale::En);
    let router = build_router(state, TEST_MAX_BODY_BYTES);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server listener: {err}"))?;
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(SpawnedServer {
        base_url: format!("http://{addr}"),
        store,
        outbox,
        join,
        workdir,
    })
}

/// Spawns a Callboard server on a fresh loopback port.
///
/// The server runs against an in-memory store and outbox; both are returned
/// on the handle so suites can seed fixtures and assert side effects.
pub async fn spawn_server() -> Result<SpawnedServer, String> {
    let store = SharedCfpStore::from_arc(Arc::new(InMemoryCfpStore::new()));
    spawn_with_store(store, None).await
}

/// Spawns a Callboard server over an on-disk `SQLite` store.
///
/// The database lives in a temporary working directory that stays alive for
/// the lifetime of the returned handle.
pub async fn spawn_sqlite_server() -> Result<SpawnedServer, String> {
    let workdir =
        TempDir::new().map_err(|err| format!("failed to create working directory: {err}"))?;
    let config = SqliteStoreConfig {
        path: workdir.path().join("callboard.db"),
        busy_timeout_ms: TEST_BUSY_TIMEOUT_MS,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    };
    let store_backend =
        SqliteCfpStore::new(&config).map_err(|err| format!("failed to open sqlite store: {err}"))?;
    let store = SharedCfpStore::from_arc(Arc::new(store_backend));
    spawn_with_store(store, Some(workdir)).await
}

/// Builds an HTTP client with a cookie store enabled.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client construction must succeed")
}

/// Formats a bearer authorization header value for a session token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
