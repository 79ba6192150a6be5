use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Debug,
    Release,
}

impl RunMode {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("release") => RunMode::Release,
            _ => RunMode::Debug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub mode: RunMode,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = get("HOST", "0.0.0.0");
        let port = parse_number::<u16>("PORT", &get("PORT", "8080"))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let database = DatabaseConfig {
            host: get("DB_HOST", "localhost"),
            port: parse_number("DB_PORT", &get("DB_PORT", "5432"))?,
            user: get("DB_USER", "postgres"),
            password: get("DB_PASSWORD", "postgres"),
            name: get("DB_NAME", "jsonapi"),
            max_connections: parse_number("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "10"))?,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            database,
            mode: RunMode::parse(lookup("APP_MODE").as_deref()),
        })
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password, "postgres");
        assert_eq!(config.database.name, "jsonapi");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.mode, RunMode::Debug);
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "records"),
            ("APP_MODE", "release"),
        ])
        .unwrap();

        assert_eq!(config.server_addr.port(), 9090);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.name, "records");
        assert_eq!(config.mode, RunMode::Release);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", ""), ("DB_USER", "")]).unwrap();
        assert_eq!(config.server_addr.port(), 8080);
        assert_eq!(config.database.user, "postgres");
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("PORT")));

        let err = config_from(&[("DB_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("DB_PORT")));
    }
}
