use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection URL for the credential and contacts store.
    pub database_url: String,
    /// Revocation store connection settings.
    pub redis: RedisConfig,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

/// Redis connection settings for the revocation store.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// `redis://` URL, including password if any.
    pub url: String,
    /// Maximum pooled connections (default: `10`).
    pub pool_size: u32,
    /// Time allowed to open a connection (default: `5`).
    pub connect_timeout_secs: u64,
    /// Time allowed for a single command (default: `500`).
    pub command_timeout_ms: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `DATABASE_URL`               | built from `DB_*`          |
    /// | `DB_HOST` / `DB_PORT`        | `localhost` / `5432`       |
    /// | `DB_USER` / `DB_PASSWORD`    | `postgres` / empty         |
    /// | `DB_NAME`                    | `contactbook`              |
    /// | `REDIS_URL`                  | built from `REDIS_*`       |
    /// | `REDIS_HOST` / `REDIS_PORT`  | `localhost` / `6379`       |
    /// | `REDIS_PASSWORD`             | none                       |
    /// | `REDIS_POOL_SIZE`            | `10`                       |
    /// | `REDIS_CONNECT_TIMEOUT_SECS` | `5`                        |
    /// | `REDIS_COMMAND_TIMEOUT_MS`   | `500`                      |
    ///
    /// See [`JwtConfig::from_env`] for the token settings.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers or a missing `JWT_SECRET`, so
    /// misconfiguration stops the process at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "http://localhost:5173"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            database_url_from_parts(
                &env_or("DB_HOST", "localhost"),
                &env_or("DB_PORT", "5432"),
                &env_or("DB_USER", "postgres"),
                std::env::var("DB_PASSWORD").ok().as_deref(),
                &env_or("DB_NAME", "contactbook"),
            )
        });

        let redis = RedisConfig::from_env();
        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            redis,
            jwt,
        }
    }
}

impl RedisConfig {
    /// Load the `REDIS_*` variables described on [`ServerConfig::from_env`].
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| {
            redis_url_from_parts(
                &env_or("REDIS_HOST", "localhost"),
                &env_or("REDIS_PORT", "6379"),
                std::env::var("REDIS_PASSWORD").ok().as_deref(),
            )
        });

        let pool_size: u32 = env_or("REDIS_POOL_SIZE", "10")
            .parse()
            .expect("REDIS_POOL_SIZE must be a valid u32");
        assert!(pool_size > 0, "REDIS_POOL_SIZE must be positive");

        let connect_timeout_secs: u64 = env_or("REDIS_CONNECT_TIMEOUT_SECS", "5")
            .parse()
            .expect("REDIS_CONNECT_TIMEOUT_SECS must be a valid u64");

        let command_timeout_ms: u64 = env_or("REDIS_COMMAND_TIMEOUT_MS", "500")
            .parse()
            .expect("REDIS_COMMAND_TIMEOUT_MS must be a valid u64");

        Self {
            url,
            pool_size,
            connect_timeout_secs,
            command_timeout_ms,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn database_url_from_parts(
    host: &str,
    port: &str,
    user: &str,
    password: Option<&str>,
    name: &str,
) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        None => format!("postgres://{user}@{host}:{port}/{name}"),
    }
}

fn redis_url_from_parts(host: &str, port: &str, password: Option<&str>) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("redis://:{password}@{host}:{port}"),
        None => format!("redis://{host}:{port}"),
    }
}
