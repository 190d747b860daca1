//! Section membership, keyed by section and user.

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter, QueryBuf};
use crate::store::Database;

const MEMBERS_OF_ORGANIZATION: &str = r#"SELECT "members"."section_id" AS "section_id", "members"."user_id" AS "user_id", "members"."rights" AS "rights" FROM "members" JOIN "sections" ON "members"."section_id" = "sections"."section_id" WHERE "sections"."organization_id" = ?"#;

/// A user's membership in a section together with the rights level held there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub section_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub rights: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberPatch {
    #[serde(default)]
    pub rights: Option<i64>,
}

impl Entity for Member {
    const NAME: &'static str = "member";
    const TABLE: &'static str = "members";
    const KEY_COLUMNS: &'static [&'static str] = &["section_id", "user_id"];
    const INSERT_COLUMNS: &'static [&'static str] = &["section_id", "user_id", "rights"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["rights"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.section_id.into(), self.user_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![self.section_id.into(), self.user_id.into(), self.rights.into()]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![self.rights.into()]
    }
}

impl Member {
    pub fn with_key(section_id: i64, user_id: i64) -> Self {
        Member {
            section_id,
            user_id,
            rights: 0,
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

    pub fn patch(&mut self, patch: MemberPatch) {
        if let Some(rights) = patch.rights {
            self.rights = rights;
        }
    }

    /// Members of every section belonging to the organization, or all members when
    /// `organization_id < 1`.
    pub async fn list(db: &Database, organization_id: i64) -> Result<Vec<Self>, StoreError> {
        if organization_id < 1 {
            return CrudService::list(db, &Filter::All).await;
        }
        let q = QueryBuf::new(MEMBERS_OF_ORGANIZATION).bind(organization_id);
        CrudService::list_query(db, &q).await
    }

    pub async fn delete(db: &Database, section_id: i64, user_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![section_id.into(), user_id.into()]).await
    }
}
