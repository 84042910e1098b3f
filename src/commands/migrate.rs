//! Migrate command - schema management for the postboard database.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // The migrator is driven explicitly here, so skip the automatic
    // schema sync the server does on boot.
    let db = Database::open(&config)
        .await
        .map_err(|e| AppError::internal(format!("Could not reach the database: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await.map_err(migration_error)?;
            tracing::info!("postboard schema is up to date");
        }
        MigrateAction::Down => {
            db.migrate_down().await.map_err(migration_error)?;
            tracing::info!("rolled back one migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(migration_error)? {
                let marker = if applied { "applied" } else { "pending" };
                println!("{:<8} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("dropping the postboard tables and migrating from scratch");
            db.migrate_fresh().await.map_err(migration_error)?;
            tracing::info!("fresh schema created");
        }
    }

    Ok(())
}

fn migration_error(err: sea_orm::DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", err))
}
