//! Event rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_optional_text, merge_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// A rehearsal, concert or meeting of an organization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    #[serde(default)]
    pub event_id: i64,
    pub organization_id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// User who created the event.
    #[serde(default)]
    pub creator: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl Entity for Event {
    const NAME: &'static str = "event";
    const TABLE: &'static str = "events";
    const KEY_COLUMNS: &'static [&'static str] = &["event_id"];
    const GENERATED_KEY: Option<&'static str> = Some("event_id");
    const INSERT_COLUMNS: &'static [&'static str] =
        &["organization_id", "name", "address", "start", "end", "creator"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["name", "address", "start", "end"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.event_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![
            self.organization_id.into(),
            self.name.clone().into(),
            self.address.clone().into(),
            self.start.into(),
            self.end.into(),
            self.creator.into(),
        ]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![
            self.name.clone().into(),
            self.address.clone().into(),
            self.start.into(),
            self.end.into(),
        ]
    }

    fn set_generated_key(&mut self, id: i64) {
        self.event_id = id;
    }
}

impl Event {
    pub fn with_id(event_id: i64) -> Self {
        Event {
            event_id,
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

    pub fn patch(&mut self, patch: EventPatch) {
        merge_text(&mut self.name, patch.name);
        merge_optional_text(&mut self.address, patch.address);
        if let Some(start) = patch.start {
            self.start = start;
        }
        if patch.end.is_some() {
            self.end = patch.end;
        }
    }

    /// Events of one organization, or all events when `organization_id < 1`.
    pub async fn list(db: &Database, organization_id: i64) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::by_id("organization_id", organization_id)).await
    }

    pub async fn delete(db: &Database, event_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![event_id.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn patch_moves_times_and_keeps_address() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let mut event = Event {
            event_id: 3,
            organization_id: 1,
            name: "Rehearsal".into(),
            address: Some("Music School".into()),
            start,
            end: None,
            creator: 2,
        };
        let later = start + chrono::Duration::hours(2);
        event.patch(EventPatch {
            name: Some(String::new()),
            address: Some(String::new()),
            start: Some(later),
            end: Some(later + chrono::Duration::hours(3)),
        });
        assert_eq!(event.name, "Rehearsal");
        assert_eq!(event.address.as_deref(), Some("Music School"));
        assert_eq!(event.start, later);
        assert_eq!(event.end, Some(later + chrono::Duration::hours(3)));
    }
}
