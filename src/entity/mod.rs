//! Persisted entity types and the metadata trait the shared SQL builders run on.

mod attendee;
mod comment;
mod event;
mod info;
mod member;
mod organization;
mod section;
mod user;

pub use attendee::{Attendee, AttendeePatch, Commitment};
pub use comment::{Comment, CommentPatch};
pub use event::{Event, EventPatch};
pub use info::{Info, InfoPatch};
pub use member::{Member, MemberPatch};
pub use organization::{Organization, OrganizationPatch};
pub use section::{Section, SectionPatch};
pub use user::{NewUser, User, UserPatch};

use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

use crate::sql::BindValue;

/// Table metadata and column values for one row type.
///
/// Column lists and value lists are positional: `insert_values()[i]` belongs to
/// `INSERT_COLUMNS[i]`, and likewise for update and key columns.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin + Sized
{
    /// Singular name used in error context.
    const NAME: &'static str;
    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    /// Surrogate id column assigned by the database on insert.
    const GENERATED_KEY: Option<&'static str> = None;
    const INSERT_COLUMNS: &'static [&'static str];
    const UPDATE_COLUMNS: &'static [&'static str];

    fn key_values(&self) -> Vec<BindValue>;
    fn insert_values(&self) -> Vec<BindValue>;
    fn update_values(&self) -> Vec<BindValue>;

    /// Store the id produced by an insert. Only called when `GENERATED_KEY` is set.
    fn set_generated_key(&mut self, _id: i64) {}
}

/// Overwrite `target` only with a present, non-empty value.
pub(crate) fn merge_text(target: &mut String, incoming: Option<String>) {
    if let Some(v) = incoming.filter(|v| !v.is_empty()) {
        *target = v;
    }
}

pub(crate) fn merge_optional_text(target: &mut Option<String>, incoming: Option<String>) {
    if let Some(v) = incoming.filter(|v| !v.is_empty()) {
        *target = Some(v);
    }
}

/// Byte blobs travel as standard base64 strings in JSON.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(d)?;
        STANDARD.decode(raw.as_bytes()).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) => STANDARD
                    .decode(raw.as_bytes())
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
