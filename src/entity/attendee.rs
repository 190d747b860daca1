//! Attendees and their commitment level.

use serde::{Deserialize, Serialize};

use super::{merge_optional_text, Entity};
use crate::error::StoreError;
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// Attendance intent of a user for an event. Stored and serialized as its integer value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i64", try_from = "i64")]
#[repr(i64)]
pub enum Commitment {
    #[default]
    Pending = 0,
    Attending = 1,
    Maybe = 2,
    Declined = 3,
}

impl From<Commitment> for i64 {
    fn from(c: Commitment) -> Self {
        c as i64
    }
}

impl TryFrom<i64> for Commitment {
    type Error = String;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Commitment::Pending),
            1 => Ok(Commitment::Attending),
            2 => Ok(Commitment::Maybe),
            3 => Ok(Commitment::Declined),
            other => Err(format!("unknown commitment {}", other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendee {
    pub event_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub commitment: Commitment,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AttendeePatch {
    #[serde(default)]
    pub commitment: Option<Commitment>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Entity for Attendee {
    const NAME: &'static str = "attendee";
    const TABLE: &'static str = "attendees";
    const KEY_COLUMNS: &'static [&'static str] = &["event_id", "user_id"];
    const INSERT_COLUMNS: &'static [&'static str] = &["event_id", "user_id", "commitment", "comment"];
    const UPDATE_COLUMNS: &'static [&'static str] = &["commitment", "comment"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.event_id.into(), self.user_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![
            self.event_id.into(),
            self.user_id.into(),
            i64::from(self.commitment).into(),
            self.comment.clone().into(),
        ]
    }

    fn update_values(&self) -> Vec<BindValue> {
        vec![i64::from(self.commitment).into(), self.comment.clone().into()]
    }
}

impl Attendee {
    pub fn with_key(event_id: i64, user_id: i64) -> Self {
        Attendee {
            event_id,
            user_id,
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

    pub fn patch(&mut self, patch: AttendeePatch) {
        if let Some(commitment) = patch.commitment {
            self.commitment = commitment;
        }
        merge_optional_text(&mut self.comment, patch.comment);
    }

    /// Attendees of one event, or every attendee row when `event_id < 1`.
    pub async fn list(db: &Database, event_id: i64) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::by_id("event_id", event_id)).await
    }

    pub async fn delete(db: &Database, event_id: i64, user_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![event_id.into(), user_id.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_is_a_plain_integer_in_json() {
        let a = Attendee {
            event_id: 1,
            user_id: 2,
            commitment: Commitment::Maybe,
            comment: None,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["commitment"], 2);
        assert!(serde_json::from_str::<AttendeePatch>(r#"{"commitment":7}"#).is_err());
    }

    #[test]
    fn patch_overwrites_commitment_when_present() {
        let mut a = Attendee::with_key(1, 2);
        a.comment = Some("late".into());
        a.patch(AttendeePatch {
            commitment: Some(Commitment::Declined),
            comment: Some(String::new()),
        });
        assert_eq!(a.commitment, Commitment::Declined);
        assert_eq!(a.comment.as_deref(), Some("late"));
    }
}
