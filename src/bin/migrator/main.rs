//! Thin CLI that applies forward migrations against `-storage-path` from
//! `-migrations-path`, then exits. No down-migrations, no dry-run — the
//! schema-migration tooling itself is out of scope (§1); this binary is
//! just the entry point sqlx's runtime migrator is driven from.

use keepd::config::MigratorArgs;
use sqlx::migrate::Migrator;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("migration failed: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args = MigratorArgs::from_env();

    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect(&args.storage_path)
        .await?;

    let migrator = Migrator::new(Path::new(&args.migrations_path)).await?;

    let applied_before = sqlx::query_scalar::<_, i64>(
        "SELECT count(*) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(&pool)
    .await
    .unwrap_or(0);

    migrator.run(&pool).await?;

    let applied_after = sqlx::query_scalar::<_, i64>(
        "SELECT count(*) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(&pool)
    .await
    .unwrap_or(applied_before);

    if applied_after > applied_before {
        println!("Migrations apply");
    } else {
        println!("no migrations to apply");
    }

    Ok(())
}
