//! Comment rows attached to an event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    #[serde(default)]
    pub comment_id: i64,
    #[serde(default)]
    pub event_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub creation: DateTime<Utc>,
    pub comment: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CommentPatch {
    #[serde(default)]
    pub creation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Entity for Comment {
    const NAME: &'static str = "comment";
    const TABLE: &'static str = "comments";
    const KEY_COLUMNS: &'static [&'static str] = &["comment_id"];
    const GENERATED_KEY: Option<&'static str> = Some("comment_id");
    const INSERT_COLUMNS: &'static [&'static str] = &["creation", "comment", "event_id", "user_id"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["creation", "comment"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.comment_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![
            self.creation.into(),
            self.comment.clone().into(),
            self.event_id.into(),
            self.user_id.into(),
        ]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![self.creation.into(), self.comment.clone().into()]
    }

    fn set_generated_key(&mut self, id: i64) {
        self.comment_id = id;
    }
}

impl Comment {
    pub fn with_id(comment_id: i64) -> Self {
        Comment {
            comment_id,
            ..Default::default()
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

    pub fn patch(&mut self, patch: CommentPatch) {
        if let Some(creation) = patch.creation {
            self.creation = creation;
        }
        merge_text(&mut self.comment, patch.comment);
    }

    /// Comments on one event, or all comments when `event_id < 1`.
    pub async fn list(db: &Database, event_id: i64) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::by_id("event_id", event_id)).await
    }

    pub async fn delete(db: &Database, comment_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![comment_id.into()]).await
    }
}
