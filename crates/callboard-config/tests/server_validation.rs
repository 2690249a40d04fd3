//! Config semantic validation tests for callboard-config.
// crates/callboard-config/tests/server_validation.rs
// =============================================================================
// Module: Config Semantic Validation Tests
// Description: Validate server, store, and mail section consistency checks.
// Purpose: Ensure inconsistent configurations are rejected before binding.
// =============================================================================

use callboard_config::CallboardConfig;
use callboard_config::ServerConfig;
use callboard_config::StoreConfig;
use callboard_config::StoreType;

type TestResult = Result<(), String>;

fn assert_invalid(config: &CallboardConfig, needle: &str) -> TestResult {
    match config.validate() {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn validate_rejects_unparseable_bind() -> TestResult {
    let config = CallboardConfig {
        server: ServerConfig {
            bind: "not-an-address".to_string(),
            ..ServerConfig::default()
        },
        ..CallboardConfig::default()
    };
    assert_invalid(&config, "bind address is not a socket address")?;
    Ok(())
}

#[test]
fn validate_rejects_zero_body_cap() -> TestResult {
    let config = CallboardConfig {
        server: ServerConfig {
            max_body_bytes: 0,
            ..ServerConfig::default()
        },
        ..CallboardConfig::default()
    };
    assert_invalid(&config, "max_body_bytes must be greater than zero")?;
    Ok(())
}

#[test]
fn validate_rejects_sqlite_store_without_path() -> TestResult {
    let config = CallboardConfig {
        store: StoreConfig {
            store_type: StoreType::Sqlite,
            path: None,
            ..StoreConfig::default()
        },
        ..CallboardConfig::default()
    };
    assert_invalid(&config, "sqlite store requires a path")?;
    Ok(())
}

#[test]
fn validate_rejects_zero_busy_timeout() -> TestResult {
    let config = CallboardConfig {
        store: StoreConfig {
            busy_timeout_ms: 0,
            ..StoreConfig::default()
        },
        ..CallboardConfig::default()
    };
    assert_invalid(&config, "busy_timeout_ms must be greater than zero")?;
    Ok(())
}

#[test]
fn validate_accepts_defaults() -> TestResult {
    CallboardConfig::default().validate().map_err(|err| err.to_string())
}
