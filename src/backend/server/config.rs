/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * and opens the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Values come from the process environment (a `.env` file is loaded by the
 * binary before this runs). Every value has a development default; using a
 * default is logged so a misconfigured deployment is visible in the logs.
 *
 * | Variable | Default |
 * |---|---|
 * | `SERVER_PORT` | `8000` |
 * | `DATABASE_URL` | `sqlite://youter.db?mode=rwc` |
 * | `CORS_ORIGIN` | `*` |
 * | `BODY_LIMIT` | `16384` |
 * | `STATIC_DIR` | `public` |
 * | `ACCESS_TOKEN_SECRET` / `REFRESH_TOKEN_SECRET` | development secrets |
 * | `ACCESS_TOKEN_EXPIRY` / `REFRESH_TOKEN_EXPIRY` | `1d` / `10d` |
 * | `PASSWORD_HASH_COST` | `10` |
 */

use std::{env, fmt::Display, str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

const DEV_ACCESS_SECRET: &str = "youter-dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "youter-dev-refresh-secret-change-me";

/// bcrypt work factor used when `PASSWORD_HASH_COST` is unset
pub const DEFAULT_HASH_COST: u32 = 10;
/// Lowest cost bcrypt accepts; fast enough for tests
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Token and password hashing settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens
    pub access_secret: String,
    /// Access token lifetime
    pub access_expiry: Duration,
    /// HS256 secret for refresh tokens
    pub refresh_secret: String,
    /// Refresh token lifetime
    pub refresh_expiry: Duration,
    /// bcrypt cost factor
    pub hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: DEV_ACCESS_SECRET.to_string(),
            access_expiry: Duration::from_secs(24 * 60 * 60),
            refresh_secret: DEV_REFRESH_SECRET.to_string(),
            refresh_expiry: Duration::from_secs(10 * 24 * 60 * 60),
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

/// Full server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// Allowed cross-origin host, `*` for any
    pub cors_origin: String,
    /// Maximum request body size in bytes
    pub body_limit: usize,
    /// Directory served under `/static`
    pub static_dir: String,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: "sqlite://youter.db?mode=rwc".to_string(),
            cors_origin: "*".to_string(),
            body_limit: 16 * 1024,
            static_dir: "public".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let auth = AuthConfig {
            access_secret: load_secret("ACCESS_TOKEN_SECRET", DEV_ACCESS_SECRET),
            access_expiry: load_expiry("ACCESS_TOKEN_EXPIRY", "1d")?,
            refresh_secret: load_secret("REFRESH_TOKEN_SECRET", DEV_REFRESH_SECRET),
            refresh_expiry: load_expiry("REFRESH_TOKEN_EXPIRY", "10d")?,
            hash_cost: try_load("PASSWORD_HASH_COST", &defaults.auth.hash_cost.to_string())?,
        };

        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&auth.hash_cost) {
            return Err(ConfigError::InvalidValue {
                key: "PASSWORD_HASH_COST",
                message: format!("must be between {MIN_HASH_COST} and {MAX_HASH_COST}"),
            });
        }

        Ok(Self {
            port: try_load("SERVER_PORT", &defaults.port.to_string())?,
            database_url: try_load("DATABASE_URL", &defaults.database_url)?,
            cors_origin: try_load("CORS_ORIGIN", &defaults.cors_origin)?,
            body_limit: try_load("BODY_LIMIT", &defaults.body_limit.to_string())?,
            static_dir: try_load("STATIC_DIR", &defaults.static_dir)?,
            auth,
        })
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        message: e.to_string(),
    })
}

fn load_secret(key: &'static str, fallback: &str) -> String {
    match env::var(key) {
        Ok(secret) if !secret.trim().is_empty() => secret,
        _ => {
            tracing::warn!("{key} not set, using an insecure development secret");
            fallback.to_string()
        }
    }
}

fn load_expiry(key: &'static str, default: &str) -> Result<Duration, ConfigError> {
    let raw: String = try_load(key, default)?;
    parse_expiry(&raw).ok_or_else(|| ConfigError::InvalidValue {
        key,
        message: format!("'{raw}' is not a duration like 900, 15m, 12h or 10d"),
    })
}

/// Parse a token lifetime: plain seconds or a number with an `s`, `m`, `h`
/// or `d` suffix.
pub fn parse_expiry(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (digits, unit_secs) = match value.char_indices().last()? {
        (i, 's') => (&value[..i], 1),
        (i, 'm') => (&value[..i], 60),
        (i, 'h') => (&value[..i], 60 * 60),
        (i, 'd') => (&value[..i], 24 * 60 * 60),
        _ => (value, 1),
    };

    let amount: u64 = digits.trim().parse().ok()?;
    if amount == 0 {
        return None;
    }
    amount.checked_mul(unit_secs).map(Duration::from_secs)
}

/// Open the SQLite pool and apply migrations
///
/// Foreign keys are enabled on every connection so cascading deletes and
/// reference checks are enforced by the database.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// The pool holds exactly one connection that is never recycled, since each
/// SQLite in-memory connection is its own database.
pub async fn load_in_memory_database() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
