use clap::{Parser, ValueEnum};
use league::config::db::DbProfile;
use league::infra::db::orchestrate_migration;
use migration::MigrationCommand;

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "League database migration tool")]
struct Args {
    /// Migration command: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database type. In-memory SQLite is not offered: it would vanish when the command exits.
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,

    /// SQLite file path (defaults to LEAGUE_SQLITE_FILE, then league.sqlite)
    #[arg(long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,league=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match args.db {
        Db::Postgres => DbProfile::Postgres,
        Db::SqliteFile => DbProfile::SqliteFile { file: args.file },
    };

    if let Err(e) = orchestrate_migration(&profile, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
