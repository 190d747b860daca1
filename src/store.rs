//! Connection handle for the active SQL dialect and the statement runners on top of it.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::{DatabaseConnection, Driver};
use crate::entity::Entity;
use crate::error::{QueryContext, StoreError};
use crate::sql::{with_returning, Dialect, InsertStrategy, QueryBuf};

/// Pool for whichever driver the configuration selected. Cheap to clone.
#[derive(Clone, Debug)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Open a pool for the configured driver. SQLite connections enforce foreign keys.
    pub async fn connect(conn: &DatabaseConnection) -> Result<Self, StoreError> {
        match conn.driver {
            Driver::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(&conn.connection)
                    .await
                    .map_err(StoreError::Connect)?;
                tracing::info!("connected to PostgreSQL");
                Ok(Database::Postgres(pool))
            }
            Driver::Sqlite => {
                tracing::warn!("SQLite is meant for local and test deployments only, use PostgreSQL in production");
                let url = if conn.connection.starts_with("sqlite:") {
                    conn.connection.clone()
                } else {
                    format!("sqlite:{}", conn.connection)
                };
                let options = SqliteConnectOptions::from_str(&url)
                    .map_err(StoreError::Connect)?
                    .create_if_missing(true)
                    .foreign_keys(true);
                // Every connection to an in-memory database is a separate database.
                let pool = if url.contains(":memory:") {
                    SqlitePoolOptions::new()
                        .max_connections(1)
                        .idle_timeout(None::<Duration>)
                        .max_lifetime(None::<Duration>)
                        .connect_with(options)
                        .await
                } else {
                    SqlitePoolOptions::new().max_connections(5).connect_with(options).await
                }
                .map_err(StoreError::Connect)?;
                tracing::info!(connection = %conn.connection, "connected to SQLite");
                Ok(Database::Sqlite(pool))
            }
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Database::Postgres(_) => Dialect::Postgres,
            Database::Sqlite(_) => Dialect::Sqlite,
        }
    }

    pub fn insert_strategy(&self) -> InsertStrategy {
        self.dialect().insert_strategy()
    }

    /// `SELECT 1` round trip for readiness checks.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            Database::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
            Database::Sqlite(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
        }
    }

    /// Run a statement that returns no rows. Returns the number of rows affected.
    pub async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        let sql = self.dialect().rebind(&q.sql);
        tracing::debug!(sql = %sql, params = q.params.len(), "execute");
        match self {
            Database::Postgres(pool) => {
                let mut query = sqlx::query(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                Ok(query.execute(pool).await?.rows_affected())
            }
            Database::Sqlite(pool) => {
                let mut query = sqlx::query(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                Ok(query.execute(pool).await?.rows_affected())
            }
        }
    }

    pub async fn fetch_all<E: Entity>(&self, q: &QueryBuf) -> Result<Vec<E>, sqlx::Error> {
        let sql = self.dialect().rebind(&q.sql);
        tracing::debug!(sql = %sql, params = q.params.len(), "fetch_all");
        match self {
            Database::Postgres(pool) => {
                let mut query = sqlx::query_as::<_, E>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                query.fetch_all(pool).await
            }
            Database::Sqlite(pool) => {
                let mut query = sqlx::query_as::<_, E>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                query.fetch_all(pool).await
            }
        }
    }

    pub async fn fetch_optional<E: Entity>(&self, q: &QueryBuf) -> Result<Option<E>, sqlx::Error> {
        let sql = self.dialect().rebind(&q.sql);
        tracing::debug!(sql = %sql, params = q.params.len(), "fetch_optional");
        match self {
            Database::Postgres(pool) => {
                let mut query = sqlx::query_as::<_, E>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                query.fetch_optional(pool).await
            }
            Database::Sqlite(pool) => {
                let mut query = sqlx::query_as::<_, E>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                query.fetch_optional(pool).await
            }
        }
    }

    /// Run an INSERT. When `generated_key` names a surrogate id column the new id is
    /// returned, obtained through this connection's [`InsertStrategy`].
    pub async fn insert(
        &self,
        q: &QueryBuf,
        generated_key: Option<&str>,
        context: &str,
    ) -> Result<Option<i64>, StoreError> {
        self.insert_with(self.insert_strategy(), q, generated_key, context).await
    }

    /// [`Database::insert`] with an explicit id retrieval strategy.
    pub async fn insert_with(
        &self,
        strategy: InsertStrategy,
        q: &QueryBuf,
        generated_key: Option<&str>,
        context: &str,
    ) -> Result<Option<i64>, StoreError> {
        let Some(column) = generated_key else {
            self.execute(q).await.context(context)?;
            return Ok(None);
        };
        let id = match strategy {
            InsertStrategy::Returning => self.insert_returning(q, column, context).await?,
            InsertStrategy::LastInsertId => self.insert_last_id(q, context).await?,
        };
        Ok(Some(id))
    }

    /// `INSERT ... RETURNING` in its own transaction. A failed statement rolls back;
    /// a failed commit is reported as [`StoreError::Commit`].
    async fn insert_returning(&self, q: &QueryBuf, column: &str, context: &str) -> Result<i64, StoreError> {
        let sql = self.dialect().rebind(&with_returning(&q.sql, column));
        tracing::debug!(sql = %sql, params = q.params.len(), "insert returning");
        let commit_err = |source| StoreError::Commit {
            context: context.to_owned(),
            source,
        };
        match self {
            Database::Postgres(pool) => {
                let mut tx = pool.begin().await.context(context)?;
                let mut query = sqlx::query_scalar::<_, i64>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                let id = match query.fetch_one(&mut *tx).await {
                    Ok(id) => id,
                    Err(source) => {
                        if let Err(e) = tx.rollback().await {
                            tracing::warn!(error = %e, "rollback after failed insert");
                        }
                        return Err(StoreError::query(context, source));
                    }
                };
                tx.commit().await.map_err(commit_err)?;
                Ok(id)
            }
            Database::Sqlite(pool) => {
                let mut tx = pool.begin().await.context(context)?;
                let mut query = sqlx::query_scalar::<_, i64>(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                let id = match query.fetch_one(&mut *tx).await {
                    Ok(id) => id,
                    Err(source) => {
                        if let Err(e) = tx.rollback().await {
                            tracing::warn!(error = %e, "rollback after failed insert");
                        }
                        return Err(StoreError::query(context, source));
                    }
                };
                tx.commit().await.map_err(commit_err)?;
                Ok(id)
            }
        }
    }

    /// Plain insert, then the id the connection assigned last.
    async fn insert_last_id(&self, q: &QueryBuf, context: &str) -> Result<i64, StoreError> {
        let sql = self.dialect().rebind(&q.sql);
        tracing::debug!(sql = %sql, params = q.params.len(), "insert");
        match self {
            Database::Postgres(pool) => {
                // lastval() is per session, so both statements share one connection.
                let mut conn = pool.acquire().await.context(context)?;
                let mut query = sqlx::query(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                query.execute(&mut *conn).await.context(context)?;
                sqlx::query_scalar::<_, i64>("SELECT lastval()")
                    .fetch_one(&mut *conn)
                    .await
                    .context(context)
            }
            Database::Sqlite(pool) => {
                let mut query = sqlx::query(&sql);
                for p in &q.params {
                    query = query.bind(p.clone());
                }
                let done = query.execute(pool).await.context(context)?;
                Ok(done.last_insert_rowid())
            }
        }
    }
}
