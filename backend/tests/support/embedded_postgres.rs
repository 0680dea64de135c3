//! PostgreSQL databases for the Diesel integration suite.
//!
//! By default every test gets its own temporary database on a shared embedded
//! cluster, cloned from a template that already carries the migrations. The
//! template name includes a hash of `backend/migrations`, so a schema change
//! produces a fresh template.
//!
//! Setting `USERS_API_TEST_DATABASE_URL` points the suite at an existing
//! database instead. That database is migrated and truncated before each test,
//! and tests using it run one at a time.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use users_api::outbound::persistence::run_pending_migrations;

use super::format_postgres_error;

/// Overrides the embedded cluster with an existing database.
pub const DATABASE_URL_VAR: &str = "USERS_API_TEST_DATABASE_URL";

const WORKER_VAR: &str = "PG_EMBEDDED_WORKER";
const TEMPLATE_NAME_PREFIX: &str = "users_api_template";
const SETUP_RETRIES: usize = 5;
const SETUP_RETRY_DELAY: Duration = Duration::from_millis(500);

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
static EXTERNAL_LOCK: Mutex<()> = Mutex::new(());

/// A migrated, empty database owned by one test.
///
/// Dropping it removes the temporary database, or releases the lock on the
/// external one.
pub struct TestDatabase {
    url: String,
    _backing: Backing,
}

enum Backing {
    Embedded(TemporaryDatabase),
    External(MutexGuard<'static, ()>),
}

impl TestDatabase {
    /// Connection URL for the database.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Provision a database for one test.
///
/// Uses [`DATABASE_URL_VAR`] when set, otherwise the embedded cluster.
pub fn test_database() -> Result<TestDatabase, String> {
    match std::env::var(DATABASE_URL_VAR) {
        Ok(url) => external_database(url),
        Err(_) => embedded_database(),
    }
}

/// Empty the users table and restart its id sequence.
pub fn reset_users_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("TRUNCATE users RESTART IDENTITY;")
        .map_err(|err| format_postgres_error(&err))
}

fn external_database(url: String) -> Result<TestDatabase, String> {
    let guard = EXTERNAL_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    reset_users_table(&url)?;
    Ok(TestDatabase {
        url,
        _backing: Backing::External(guard),
    })
}

fn embedded_database() -> Result<TestDatabase, String> {
    let cluster = shared_cluster()?;
    let mut last_error = String::new();
    for attempt in 1..=SETUP_RETRIES {
        match clone_template(cluster) {
            Ok(database) => {
                return Ok(TestDatabase {
                    url: database.url().to_string(),
                    _backing: Backing::Embedded(database),
                });
            }
            Err(err) => {
                last_error = format!("attempt {attempt}/{SETUP_RETRIES}: {err}");
                std::thread::sleep(SETUP_RETRY_DELAY);
            }
        }
    }
    Err(last_error)
}

/// Start (once per test binary) the embedded cluster.
///
/// Runs as root go through the `pg_worker` binary; `PG_EMBEDDED_WORKER` is
/// pointed at it unless already set.
fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _worker = std::env::var_os(WORKER_VAR)
        .is_none()
        .then(|| env_lock::lock_env([(WORKER_VAR, Some(env!("CARGO_BIN_EXE_pg_worker")))]));

    let mut last_error = String::new();
    for attempt in 1..=SETUP_RETRIES {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = format!("start cluster: attempt {attempt}/{SETUP_RETRIES}: {err:?}");
                std::thread::sleep(SETUP_RETRY_DELAY);
            }
        }
    }
    Err(last_error)
}

fn clone_template(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| err.to_string())?;
    }
    Ok(template_name)
}

fn template_database_name() -> Result<String, String> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(dir).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}
