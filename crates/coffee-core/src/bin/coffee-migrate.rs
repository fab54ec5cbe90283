// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! coffee-migrate - apply, revert and inspect the embedded schema migrations.
//!
//! ```text
//! coffee-migrate up              apply pending migrations
//! coffee-migrate down            revert every applied migration
//! coffee-migrate version         print the latest applied migration
//! coffee-migrate create <name>   print the file names for a new migration
//! ```
//!
//! The database is taken from `COFFEE_DATABASE_URL`.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use sqlx::migrate::{Migrate, Migrator};
use sqlx::{PgPool, SqlitePool};
use tracing::info;

use coffee_core::migrations;
use coffee_core::persistence::SqliteOrderStore;

#[derive(Debug, PartialEq)]
enum Command {
    Up,
    Down,
    Version,
    Create(String),
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        Some("up") => Ok(Command::Up),
        Some("down") => Ok(Command::Down),
        Some("version") => Ok(Command::Version),
        Some("create") => {
            let name = args.get(1).context("create requires a migration name")?;
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                bail!("migration name must be non-empty and use only [A-Za-z0-9_]");
            }
            Ok(Command::Create(name.clone()))
        }
        Some(other) => bail!("unknown command: {}", other),
        None => bail!("missing command"),
    }
}

fn print_usage() {
    eprintln!("Usage: coffee-migrate <up|down|version|create <name>>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COFFEE_DATABASE_URL   postgres://... or sqlite:...");
}

enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    async fn connect(url: &str) -> Result<Self> {
        if url.starts_with("sqlite:") {
            Ok(Self::Sqlite(SqliteOrderStore::open_pool(url, 1).await?))
        } else {
            Ok(Self::Postgres(PgPool::connect(url).await?))
        }
    }

    fn migrator(&self) -> &'static Migrator {
        match self {
            Self::Postgres(_) => &migrations::POSTGRES,
            Self::Sqlite(_) => &migrations::SQLITE,
        }
    }

    async fn up(&self) -> Result<()> {
        match self {
            Self::Postgres(pool) => self.migrator().run(pool).await?,
            Self::Sqlite(pool) => self.migrator().run(pool).await?,
        }
        Ok(())
    }

    async fn down(&self) -> Result<()> {
        match self {
            Self::Postgres(pool) => self.migrator().undo(pool, 0).await?,
            Self::Sqlite(pool) => self.migrator().undo(pool, 0).await?,
        }
        Ok(())
    }

    /// Latest applied migration version, if any.
    async fn version(&self) -> Result<Option<i64>> {
        let applied = match self {
            Self::Postgres(pool) => {
                let mut conn = pool.acquire().await?;
                conn.ensure_migrations_table().await?;
                conn.list_applied_migrations().await?
            }
            Self::Sqlite(pool) => {
                let mut conn = pool.acquire().await?;
                conn.ensure_migrations_table().await?;
                conn.list_applied_migrations().await?
            }
        };
        Ok(applied.iter().map(|m| m.version).max())
    }

    async fn close(self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

fn new_migration_files(name: &str) -> Vec<String> {
    let version = chrono::Utc::now().format("%Y%m%d%H%M%S");
    ["postgresql", "sqlite"]
        .iter()
        .flat_map(|dir| {
            ["up", "down"].map(|direction| {
                format!("migrations/{}/{}_{}.{}.sql", dir, version, name, direction)
            })
        })
        .collect()
}

async fn run(command: Command) -> Result<()> {
    if let Command::Create(name) = &command {
        for file in new_migration_files(name) {
            println!("{}", file);
        }
        return Ok(());
    }

    let url = std::env::var("COFFEE_DATABASE_URL")
        .context("missing required environment variable: COFFEE_DATABASE_URL")?;
    let db = Database::connect(&url).await?;

    match command {
        Command::Up => {
            db.up().await?;
            info!("Migrations applied");
        }
        Command::Down => {
            db.down().await?;
            info!("Migrations reverted");
        }
        Command::Version => match db.version().await? {
            Some(version) => println!("{}", version),
            None => println!("no migrations applied"),
        },
        Command::Create(_) => {}
    }

    db.close().await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coffee_migrate=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&args(&["up"])).unwrap(), Command::Up);
        assert_eq!(parse_args(&args(&["down"])).unwrap(), Command::Down);
        assert_eq!(parse_args(&args(&["version"])).unwrap(), Command::Version);
        assert_eq!(
            parse_args(&args(&["create", "add_notes"])).unwrap(),
            Command::Create("add_notes".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["sideways"])).is_err());
        assert!(parse_args(&args(&["create"])).is_err());
        assert!(parse_args(&args(&["create", "drop table"])).is_err());
    }

    #[test]
    fn test_new_migration_files() {
        let files = new_migration_files("add_notes");
        assert_eq!(files.len(), 4);
        assert!(files[0].starts_with("migrations/postgresql/"));
        assert!(files[0].ends_with("_add_notes.up.sql"));
        assert!(files[3].starts_with("migrations/sqlite/"));
        assert!(files[3].ends_with("_add_notes.down.sql"));
    }

    #[tokio::test]
    async fn test_sqlite_version_up_and_down() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Database::Sqlite(pool);

        assert_eq!(db.version().await.unwrap(), None);
        db.up().await.unwrap();
        assert_eq!(db.version().await.unwrap(), Some(20250301000000));
        db.down().await.unwrap();
        assert_eq!(db.version().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_up_creates_missing_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");

        let db = Database::connect(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        db.up().await.unwrap();

        assert!(path.exists());
        assert_eq!(db.version().await.unwrap(), Some(20250301000000));
        db.close().await;
    }
}
