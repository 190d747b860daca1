//! Generic CRUD execution for any [`Entity`] on either dialect.

use crate::entity::Entity;
use crate::error::{QueryContext, StoreError};
use crate::sql::{
    build_delete, build_insert, build_select, build_select_by_key, build_update, BindValue, Filter, QueryBuf,
};
use crate::store::Database;

pub struct CrudService;

impl CrudService {
    /// Insert one row. Entities with a surrogate id get it assigned.
    pub async fn insert<E: Entity>(db: &Database, entity: &mut E) -> Result<(), StoreError> {
        let q = build_insert(entity);
        let context = format!("inserting {}", E::NAME);
        if let Some(id) = db.insert(&q, E::GENERATED_KEY, &context).await? {
            entity.set_generated_key(id);
        }
        Ok(())
    }

    /// Persist all update columns of the row addressed by the entity's key. Returns rows affected.
    pub async fn update<E: Entity>(db: &Database, entity: &E) -> Result<u64, StoreError> {
        let q = build_update(entity);
        db.execute(&q).await.context(format!("updating {}", E::NAME))
    }

    /// Replace `entity` with the stored row matching its key. No row is a query error.
    pub async fn get_details<E: Entity>(db: &Database, entity: &mut E) -> Result<(), StoreError> {
        let q = build_select_by_key::<E>(entity.key_values());
        let context = format!("getting {} details", E::NAME);
        match db.fetch_optional::<E>(&q).await.context(context.clone())? {
            Some(row) => {
                *entity = row;
                Ok(())
            }
            None => Err(StoreError::query(context, sqlx::Error::RowNotFound)),
        }
    }

    pub async fn list<E: Entity>(db: &Database, filter: &Filter) -> Result<Vec<E>, StoreError> {
        let q = build_select(E::TABLE, filter);
        Self::list_query(db, &q).await
    }

    /// Rows of a hand-written SELECT that yields `E`'s columns.
    pub async fn list_query<E: Entity>(db: &Database, q: &QueryBuf) -> Result<Vec<E>, StoreError> {
        db.fetch_all::<E>(q).await.context(format!("listing {}", E::TABLE))
    }

    /// First row matching the filter, if any.
    pub async fn find<E: Entity>(db: &Database, filter: &Filter) -> Result<Option<E>, StoreError> {
        let q = build_select(E::TABLE, filter);
        db.fetch_optional::<E>(&q)
            .await
            .context(format!("finding {}", E::NAME))
    }

    /// Delete the row with the given key. Returns rows affected.
    pub async fn delete<E: Entity>(db: &Database, key: Vec<BindValue>) -> Result<u64, StoreError> {
        let q = build_delete::<E>(key);
        db.execute(&q).await.context(format!("deleting {}", E::NAME))
    }
}
