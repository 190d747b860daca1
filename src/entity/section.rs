//! Section rows.

use serde::{Deserialize, Serialize};

use super::{merge_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// Subgroup of an organization, e.g. a register of an orchestra.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    #[serde(default)]
    pub section_id: i64,
    pub organization_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl Entity for Section {
    const NAME: &'static str = "section";
    const TABLE: &'static str = "sections";
    const KEY_COLUMNS: &'static [&'static str] = &["section_id"];
    const GENERATED_KEY: Option<&'static str> = Some("section_id");
    const INSERT_COLUMNS: &'static [&'static str] = &["name", "organization_id"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["name"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.section_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![self.name.clone().into(), self.organization_id.into()]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![self.name.clone().into()]
    }

    fn set_generated_key(&mut self, id: i64) {
        self.section_id = id;
    }
}

impl Section {
    pub fn with_id(section_id: i64) -> Self {
        Section {
            section_id,
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

    pub fn patch(&mut self, patch: SectionPatch) {
        merge_text(&mut self.name, patch.name);
    }

    /// Sections of one organization, or all sections when `organization_id < 1`.
    pub async fn list(db: &Database, organization_id: i64) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::by_id("organization_id", organization_id)).await
    }

    pub async fn delete(db: &Database, section_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![section_id.into()]).await
    }
}
