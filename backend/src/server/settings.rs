//! Runtime settings loaded via OrthoConfig.
//!
//! Values are layered from command-line flags, `USERS_API_*` environment
//! variables, and configuration files.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Raised when the configured host is not an IP address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid listen host {host:?}: expected an IP address")]
pub struct InvalidHostError {
    host: String,
}

/// Settings controlling the listener and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Address to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Users are kept in memory when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Socket address built from `host` and `port`, with defaults applied.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHostError`] when `host` is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidHostError> {
        let ip = match self.host.as_deref() {
            Some(host) => host.parse::<IpAddr>().map_err(|_| InvalidHostError {
                host: host.to_owned(),
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Maximum pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USERS_API_HOST",
        "USERS_API_PORT",
        "USERS_API_DATABASE_URL",
        "USERS_API_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("users-api")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.pool_max_size(), 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_API_PORT", Some("9090".to_owned())),
            (
                "USERS_API_DATABASE_URL",
                Some("postgres://users@localhost/users".to_owned()),
            ),
            ("USERS_API_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://users@localhost/users")
        );
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let settings = ServerSettings {
            host: None,
            port: None,
            database_url: Some("   ".to_owned()),
            pool_max_size: None,
        };

        assert_eq!(settings.database_url(), None);
    }

    #[rstest]
    fn hostname_is_rejected() {
        let settings = ServerSettings {
            host: Some("localhost".to_owned()),
            port: None,
            database_url: None,
            pool_max_size: None,
        };

        let err = settings.bind_addr().expect_err("hostnames are not resolved");
        assert!(err.to_string().contains("localhost"));
    }
}
