use std::env;

use super::ConfigError;

/// Which backing database the relational store connects to
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// PostgreSQL, URL assembled from environment variables
    Postgres,
    /// Private SQLite in-memory database (tests, dry runs)
    SqliteMemory,
    /// SQLite file; `None` falls back to `LEAGUE_SQLITE_FILE` or `league.sqlite`
    SqliteFile { file: Option<String> },
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds a database URL for the given profile and owner
pub fn db_url(profile: &DbProfile, owner: DbOwner) -> Result<String, ConfigError> {
    match profile {
        DbProfile::Postgres => {
            let host = host();
            let port = port()?;
            let db_name = must_var("LEAGUE_DB")?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbProfile::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => {
            let path = match file {
                Some(path) => path.clone(),
                None => env::var("LEAGUE_SQLITE_FILE").unwrap_or_else(|_| "league.sqlite".into()),
            };
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> Result<u16, ConfigError> {
    match env::var("POSTGRES_PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "POSTGRES_PORT",
            value: raw,
        }),
        Err(_) => Ok(5432),
    }
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), ConfigError> {
    match owner {
        DbOwner::App => Ok((
            must_var("LEAGUE_APP_DB_USER")?,
            must_var("LEAGUE_APP_DB_PASSWORD")?,
        )),
        DbOwner::Owner => Ok((
            must_var("LEAGUE_OWNER_USER")?,
            must_var("LEAGUE_OWNER_PASSWORD")?,
        )),
    }
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing { name })
}
