//! Privilege-dropping helper for embedded PostgreSQL in the test suite.
//!
//! When the Diesel integration tests run as root, `pg_embedded_setup_unpriv`
//! re-executes this binary as an unprivileged user with an operation name and
//! the path of a JSON [`WorkerPayload`].
//!
//! Usage: `pg_worker <setup|start|stop> <payload.json>`

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::{env, fs};

use pg_embedded_setup_unpriv::worker::WorkerPayload;
use postgresql_embedded::PostgreSQL;
use tokio::runtime::Builder;

#[derive(Debug, thiserror::Error)]
enum WorkerError {
    #[error("usage: pg_worker <setup|start|stop> <payload.json>: {0}")]
    Usage(String),
    #[error("failed to read payload {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse payload {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to prepare PostgreSQL: {0}")]
    Prepare(String),
    #[error("postgresql {operation} failed: {message}")]
    Operation {
        operation: Operation,
        message: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
}

impl Operation {
    fn parse(raw: &OsStr) -> Result<Self, WorkerError> {
        match raw.to_string_lossy().as_ref() {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(WorkerError::Usage(format!("unknown operation '{other}'"))),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        })
    }
}

fn main() -> Result<(), WorkerError> {
    let (operation, path) = parse_args(env::args_os())?;
    let payload = load_payload(&path)?;
    execute(operation, payload)
}

fn parse_args(
    mut args: impl Iterator<Item = OsString>,
) -> Result<(Operation, PathBuf), WorkerError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| WorkerError::Usage("missing operation".to_owned()))
        .and_then(|raw| Operation::parse(&raw))?;
    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| WorkerError::Usage("missing payload path".to_owned()))?;
    if let Some(extra) = args.next() {
        return Err(WorkerError::Usage(format!(
            "unexpected argument '{}'",
            extra.to_string_lossy()
        )));
    }
    Ok((operation, path))
}

fn load_payload(path: &Path) -> Result<WorkerPayload, WorkerError> {
    let raw = fs::read(path).map_err(|source| WorkerError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| WorkerError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn execute(operation: Operation, payload: WorkerPayload) -> Result<(), WorkerError> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| WorkerError::Prepare(err.to_string()))?;
    for (key, value) in payload.environment {
        // SAFETY: the process is still single-threaded here.
        match value {
            Some(value) => unsafe { env::set_var(&key, value.expose()) },
            None => unsafe { env::remove_var(&key) },
        }
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| WorkerError::Prepare(err.to_string()))?;
    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async {
            match operation {
                Operation::Setup => postgres.setup().await,
                Operation::Start => postgres.start().await,
                Operation::Stop => postgres.stop().await,
            }
        })
        .map_err(|err| WorkerError::Operation {
            operation,
            message: err.to_string(),
        })
}
