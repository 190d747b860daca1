//! Schema bootstrap: per-dialect migrations embedded at compile time.

use sqlx::migrate::Migrator;

use crate::error::StoreError;
use crate::store::Database;

static POSTGRES_MIGRATIONS: Migrator = sqlx::migrate!("migrations/postgres");
static SQLITE_MIGRATIONS: Migrator = sqlx::migrate!("migrations/sqlite");

/// Apply pending migrations for the connected dialect, in version order. Applied
/// versions are tracked in `_sqlx_migrations`, so running this twice is a no-op.
pub async fn apply_migrations(db: &Database) -> Result<(), StoreError> {
    let migrator = match db {
        Database::Postgres(_) => &POSTGRES_MIGRATIONS,
        Database::Sqlite(_) => &SQLITE_MIGRATIONS,
    };
    match db {
        Database::Postgres(pool) => migrator.run(pool).await?,
        Database::Sqlite(pool) => migrator.run(pool).await?,
    }
    tracing::info!(
        dialect = ?db.dialect(),
        migrations = migrator.iter().count(),
        "schema up to date"
    );
    Ok(())
}
