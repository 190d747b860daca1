//! Organization rows with an inline picture blob.

use serde::{Deserialize, Serialize};

use super::{base64_bytes, merge_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// Club, orchestra or association owning sections and events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    #[serde(default)]
    pub organization_id: i64,
    pub name: String,
    #[serde(default, with = "base64_bytes")]
    pub picture: Vec<u8>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrganizationPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "base64_bytes::option::deserialize")]
    pub picture: Option<Vec<u8>>,
}

impl Entity for Organization {
    const NAME: &'static str = "organization";
    const TABLE: &'static str = "organizations";
    const KEY_COLUMNS: &'static [&'static str] = &["organization_id"];
    const GENERATED_KEY: Option<&'static str> = Some("organization_id");
    const INSERT_COLUMNS: &'static [&'static str] = &["name", "picture"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["name", "picture"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.organization_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![self.name.clone().into(), self.picture.clone().into()]
    }

    fn update_values(&self) -> Vec<BindValue> {
        self.insert_values()
    }

    fn set_generated_key(&mut self, id: i64) {
        self.organization_id = id;
    }
}

impl Organization {
    pub fn with_id(organization_id: i64) -> Self {
        Organization {
            organization_id,
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

    pub fn patch(&mut self, patch: OrganizationPatch) {
        merge_text(&mut self.name, patch.name);
        if let Some(picture) = patch.picture.filter(|p| !p.is_empty()) {
            self.picture = picture;
        }
    }

    pub async fn list(db: &Database) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::All).await
    }

    pub async fn delete(db: &Database, organization_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![organization_id.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_is_base64_in_json() {
        let org = Organization {
            organization_id: 1,
            name: "Wind Ensemble".into(),
            picture: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["picture"], "3q2+7w==");
        let back: Organization = serde_json::from_value(json).unwrap();
        assert_eq!(back, org);
    }

    #[test]
    fn patch_skips_empty_fields() {
        let mut org = Organization {
            organization_id: 1,
            name: "Wind Ensemble".into(),
            picture: vec![1],
        };
        let patch: OrganizationPatch = serde_json::from_str(r#"{"name":"","picture":""}"#).unwrap();
        org.patch(patch);
        assert_eq!(org.name, "Wind Ensemble");
        assert_eq!(org.picture, vec![1]);

        org.patch(OrganizationPatch {
            name: Some("Brass Ensemble".into()),
            picture: None,
        });
        assert_eq!(org.name, "Brass Ensemble");
    }
}
