// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration loading from environment variables.

use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL or SQLite connection URL
    pub database_url: String,
    /// QUIC address of the brew (orders) service
    pub brew_addr: SocketAddr,
    /// QUIC address of the menu service
    pub menu_addr: SocketAddr,
    /// Connection pool size
    pub db_max_connections: u32,
    /// Apply pending migrations at start-up
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `COFFEE_DATABASE_URL`: PostgreSQL or SQLite (`sqlite:...`) connection string
    ///
    /// Optional (with defaults):
    /// - `COFFEE_BREW_PORT`: brew service port (default: 50051)
    /// - `COFFEE_MENU_PORT`: menu service port (default: 50052)
    /// - `COFFEE_DB_MAX_CONNECTIONS`: pool size (default: 10)
    /// - `COFFEE_RUN_MIGRATIONS`: `true`/`false` (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("COFFEE_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("COFFEE_DATABASE_URL"))?;

        let brew_port: u16 = std::env::var("COFFEE_BREW_PORT")
            .unwrap_or_else(|_| "50051".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("COFFEE_BREW_PORT", "must be a valid port number"))?;

        let menu_port: u16 = std::env::var("COFFEE_MENU_PORT")
            .unwrap_or_else(|_| "50052".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("COFFEE_MENU_PORT", "must be a valid port number"))?;

        let db_max_connections: u32 = std::env::var("COFFEE_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid(
                "COFFEE_DB_MAX_CONNECTIONS",
                "must be a positive integer",
            ))?;

        let run_migrations = match std::env::var("COFFEE_RUN_MIGRATIONS") {
            Err(_) => true,
            Ok(v) => parse_bool(&v)
                .ok_or(ConfigError::Invalid("COFFEE_RUN_MIGRATIONS", "must be true or false"))?,
        };

        if brew_port != 0 && brew_port == menu_port {
            return Err(ConfigError::Invalid(
                "COFFEE_MENU_PORT",
                "must differ from COFFEE_BREW_PORT",
            ));
        }

        Ok(Self {
            database_url,
            brew_addr: SocketAddr::from(([0, 0, 0, 0], brew_port)),
            menu_addr: SocketAddr::from(([0, 0, 0, 0], menu_port)),
            db_max_connections,
            run_migrations,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "COFFEE_DATABASE_URL",
        "COFFEE_BREW_PORT",
        "COFFEE_MENU_PORT",
        "COFFEE_DB_MAX_CONNECTIONS",
        "COFFEE_RUN_MIGRATIONS",
    ];

    /// Restores touched variables on drop.
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Start from a clean slate for every variable `Config` reads.
        fn clean() -> Self {
            let mut guard = Self { vars: Vec::new() };
            for key in VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars.push((key.to_string(), env::var(key).ok()));
            // SAFETY: Tests are serialized via ENV_MUTEX, so no concurrent access
            unsafe { env::set_var(key, value) };
        }

        fn remove(&mut self, key: &str) {
            self.vars.push((key.to_string(), env::var(key).ok()));
            // SAFETY: Tests are serialized via ENV_MUTEX, so no concurrent access
            unsafe { env::remove_var(key) };
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.vars.drain(..).rev() {
                // SAFETY: Tests are serialized via ENV_MUTEX, so no concurrent access
                unsafe {
                    match value {
                        Some(v) => env::set_var(&key, v),
                        None => env::remove_var(&key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut guard = EnvGuard::clean();
        guard.set("COFFEE_DATABASE_URL", "postgres://localhost/coffee");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "postgres://localhost/coffee");
        assert_eq!(config.brew_addr.port(), 50051);
        assert_eq!(config.menu_addr.port(), 50052);
        assert_eq!(config.db_max_connections, 10);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_custom_values() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut guard = EnvGuard::clean();
        guard.set("COFFEE_DATABASE_URL", "sqlite:coffee.db");
        guard.set("COFFEE_BREW_PORT", "7001");
        guard.set("COFFEE_MENU_PORT", "7002");
        guard.set("COFFEE_DB_MAX_CONNECTIONS", "3");
        guard.set("COFFEE_RUN_MIGRATIONS", "FALSE");

        let config = Config::from_env().unwrap();

        assert_eq!(config.brew_addr.port(), 7001);
        assert_eq!(config.menu_addr.port(), 7002);
        assert_eq!(config.db_max_connections, 3);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_missing_database_url() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::clean();

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("COFFEE_DATABASE_URL")));
        assert!(err.to_string().contains("COFFEE_DATABASE_URL"));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let cases = [
            ("COFFEE_BREW_PORT", "not_a_number"),
            ("COFFEE_MENU_PORT", "70000"),
            ("COFFEE_DB_MAX_CONNECTIONS", "0"),
            ("COFFEE_RUN_MIGRATIONS", "maybe"),
        ];

        for (key, value) in cases {
            let mut guard = EnvGuard::clean();
            guard.set("COFFEE_DATABASE_URL", "postgres://localhost/coffee");
            guard.set(key, value);

            let err = Config::from_env().unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(k, _) if k == key),
                "{key}={value} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_ports_must_differ() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut guard = EnvGuard::clean();
        guard.set("COFFEE_DATABASE_URL", "postgres://localhost/coffee");
        guard.set("COFFEE_BREW_PORT", "6000");
        guard.set("COFFEE_MENU_PORT", "6000");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("COFFEE_MENU_PORT", _))
        ));
    }
}
