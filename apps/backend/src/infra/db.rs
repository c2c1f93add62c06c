use std::future::Future;
use std::time::Duration;

use migration::{count_applied_migrations, migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use tracing::{info, warn};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection retry succeeded");
                }
                return Ok(result);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, "connection attempt failed");
                tracing::debug!(error = %Redacted(&e.to_string()), "connection error");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(profile: &DbProfile, url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match profile {
        // Each pooled connection to `sqlite::memory:` would see its own
        // empty database, so the pool is pinned to a single connection.
        DbProfile::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbProfile::SqliteFile { .. } => {
            opt.max_connections(4);
        }
        DbProfile::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt
}

/// Connects to the database described by `profile`. Does NOT run migrations.
pub async fn connect_db(
    profile: &DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, DomainError> {
    let url = db_url(profile, owner)?;
    info!(url = %sanitize_db_url(&url), ?owner, "connecting to database");

    let opt = connect_options(profile, &url);
    let conn = match profile {
        DbProfile::Postgres => {
            retry_connection(
                || Database::connect(opt.clone()),
                CONNECT_ATTEMPTS,
                CONNECT_RETRY_INTERVAL_MS,
            )
            .await
        }
        _ => Database::connect(opt).await,
    }
    .map_err(|e| {
        warn!(error = %Redacted(&e.to_string()), "database connection failed");
        DomainError::infra(InfraErrorKind::DbUnavailable, "could not connect to database")
    })?;

    if matches!(profile, DbProfile::SqliteFile { .. }) {
        setup_sqlite_file_prerequisites(&conn).await?;
    }

    Ok(conn)
}

/// Connects and brings the schema up to date.
pub async fn bootstrap_db(
    profile: &DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, DomainError> {
    let conn = connect_db(profile, owner).await?;
    if !schema_is_current(&conn).await? {
        migrate(&conn, MigrationCommand::Up).await?;
    }
    Ok(conn)
}

/// Runs a migration command with owner credentials.
pub async fn orchestrate_migration(
    profile: &DbProfile,
    command: MigrationCommand,
) -> Result<(), DomainError> {
    let conn = connect_db(profile, DbOwner::Owner).await?;

    if command == MigrationCommand::Up && schema_is_current(&conn).await? {
        info!("migrate skipped, schema up to date");
        return Ok(());
    }

    migrate(&conn, command).await?;

    let expected = Migrator::migrations().len();
    let applied = count_applied_migrations(&conn).await?;
    match command {
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied != expected =>
        {
            Err(DomainError::infra(
                InfraErrorKind::Other("Migration".into()),
                format!("expected {expected} migrations, but {applied} were applied"),
            ))
        }
        MigrationCommand::Reset if applied != 0 => Err(DomainError::infra(
            InfraErrorKind::Other("Migration".into()),
            format!("reset should leave 0 migrations applied, but {applied} were found"),
        )),
        _ => Ok(()),
    }
}

/// True when every defined migration has been applied.
pub async fn schema_is_current(conn: &DatabaseConnection) -> Result<bool, DomainError> {
    let expected = Migrator::migrations().len();
    let applied = count_applied_migrations(conn).await?;
    if applied > expected {
        warn!(applied, expected, "database has migrations this build does not know");
    }
    Ok(applied >= expected)
}

/// Sanitize database URL by masking the password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let user_start = auth_part.find("://").map(|i| i + 3).unwrap_or(0);
    match auth_part[user_start..].find(':') {
        Some(colon_pos) => {
            let user_end = user_start + colon_pos;
            format!("{}:***@{}", &auth_part[..user_end], host_part)
        }
        None => url.to_string(),
    }
}

async fn setup_sqlite_file_prerequisites(conn: &DatabaseConnection) -> Result<(), DomainError> {
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await?;
    }
    Ok(())
}
