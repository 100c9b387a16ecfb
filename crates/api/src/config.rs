use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Where projects are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL through `projectsync-db`.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// In-process map; data is lost on restart.
    Memory,
}

impl StoreBackend {
    /// The `STORE_BACKEND` value that selects this backend.
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin, credentials disabled.
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8090`).
    pub port: u16,
    /// Parsed from comma-separated `CORS_ORIGINS` (default: `*`).
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub store: StoreBackend,
    /// Directory served as the browser frontend, if any.
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `8090`     |
    /// | `CORS_ORIGINS`         | `*`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`       |
    /// | `STORE_BACKEND`        | `postgres` |
    /// | `DATABASE_URL`         | required for `postgres` |
    /// | `DB_MAX_CONNECTIONS`   | `20`       |
    /// | `STATIC_DIR`           | unset      |
    /// | `LOG_FORMAT`           | `text`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "0.0.0.0");
        let port = parse("PORT", &get("PORT", "8090"))?;
        let cors_origins = parse_cors_origins(&get("CORS_ORIGINS", "*"))?;
        let request_timeout_secs = parse("REQUEST_TIMEOUT_SECS", &get("REQUEST_TIMEOUT_SECS", "30"))?;
        let shutdown_timeout_secs =
            parse("SHUTDOWN_TIMEOUT_SECS", &get("SHUTDOWN_TIMEOUT_SECS", "30"))?;

        let store = match get("STORE_BACKEND", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "20"))?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    reason: format!("expected 'postgres' or 'memory', got '{other}'"),
                })
            }
        };

        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match get("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            store,
            static_dir,
            log_format,
        })
    }
}

fn parse<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: format!("'{value}': {e}"),
    })
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() || entries.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    entries
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                reason: format!("'{origin}': {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_with_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/projects")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8090);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/projects".into(),
                max_connections: 20,
            }
        );
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = load(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.store.name(), "memory");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert_matches!(
            load(&[("STORE_BACKEND", "sqlite")]),
            Err(ConfigError::Invalid { name: "STORE_BACKEND", .. })
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            load(&[("STORE_BACKEND", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        );
    }

    #[test]
    fn cors_list_is_parsed() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://localhost:5173, https://app.example.com,"),
        ])
        .unwrap();
        assert_matches!(config.cors_origins, CorsOrigins::List(list) if list.len() == 2);
    }

    #[test]
    fn wildcard_anywhere_means_any() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://localhost:5173,*"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn static_dir_and_json_logs() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("STATIC_DIR", "./static"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.static_dir, Some(PathBuf::from("./static")));
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
