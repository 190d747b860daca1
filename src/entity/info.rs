//! Key/value settings table.

use serde::{Deserialize, Serialize};

use super::{merge_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// Free-form key/value setting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Info {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InfoPatch {
    #[serde(default)]
    pub value: Option<String>,
}

impl Entity for Info {
    const NAME: &'static str = "info";
    const TABLE: &'static str = "info";
    const KEY_COLUMNS: &'static [&'static str] = &["key"];
    const INSERT_COLUMNS: &'static [&'static str] = &["value", "key"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["value"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.key.clone().into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![self.value.clone().into(), self.key.clone().into()]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![self.value.clone().into()]
    }
}

impl Info {
    pub fn with_key(key: impl Into<String>) -> Self {
        Info {
            key: key.into(),
            value: String::new(),
        }
    }

    pub async fn insert(&mut self, db: &Database) -> Result<(), StoreError> {
        CrudService::insert(db, self).await
    }

    pub async fn get_details(&mut self, db: &Database) -> Result<(), StoreError> {
        CrudService::get_details(db, self).await
    }

    pub async fn update(&self, db: &Database) -> Result<u64, StoreError> {
        CrudService::update(db, self).await
    }

    pub fn patch(&mut self, patch: InfoPatch) {
        merge_text(&mut self.value, patch.value);
    }

    /// Insert the pair, or overwrite the value when the key already exists.
    pub async fn upsert(&mut self, db: &Database) -> Result<(), StoreError> {
        let existing = CrudService::find::<Self>(db, &Filter::by_column("key", self.key.as_str())).await?;
        match existing {
            Some(_) => self.update(db).await.map(|_| ()),
            None => self.insert(db).await,
        }
    }

    pub async fn list(db: &Database) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::All).await
    }

    pub async fn delete(db: &Database, key: &str) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![key.into()]).await
    }
}
