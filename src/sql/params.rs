//! Typed bind values that encode for both PostgreSQL and SQLite.

use chrono::{DateTime, Utc};
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::{Database, Type};

/// A value bound to one `?` placeholder.
///
/// Every variant keeps its SQL type even when the value is NULL, so PostgreSQL
/// receives a typed parameter for a missing end timestamp or address instead of
/// an untyped text NULL it would refuse to assign.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(Option<i64>),
    Text(Option<String>),
    Bool(bool),
    Bytes(Option<Vec<u8>>),
    Timestamp(Option<DateTime<Utc>>),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(Some(v))
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(Some(v))
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(Some(v.to_owned()))
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        BindValue::Text(v)
    }
}

impl From<Vec<u8>> for BindValue {
    fn from(v: Vec<u8>) -> Self {
        BindValue::Bytes(Some(v))
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(v: DateTime<Utc>) -> Self {
        BindValue::Timestamp(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for BindValue {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        BindValue::Timestamp(v)
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::Int(Some(n)) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::Text(Some(s)) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            BindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            BindValue::Bytes(Some(b)) => <Vec<u8> as Encode<Postgres>>::encode_by_ref(b, buf),
            BindValue::Timestamp(Some(t)) => <DateTime<Utc> as Encode<Postgres>>::encode_by_ref(t, buf),
            BindValue::Int(None) | BindValue::Text(None) | BindValue::Bytes(None) | BindValue::Timestamp(None) => {
                Ok(IsNull::Yes)
            }
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindValue::Int(_) => <i64 as Type<Postgres>>::type_info(),
            BindValue::Text(_) => <String as Type<Postgres>>::type_info(),
            BindValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            BindValue::Bytes(_) => <Vec<u8> as Type<Postgres>>::type_info(),
            BindValue::Timestamp(_) => <DateTime<Utc> as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

impl<'q> Encode<'q, Sqlite> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::Int(Some(n)) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            BindValue::Text(Some(s)) => <String as Encode<Sqlite>>::encode_by_ref(s, buf),
            BindValue::Bool(b) => <bool as Encode<Sqlite>>::encode_by_ref(b, buf),
            BindValue::Bytes(Some(b)) => <Vec<u8> as Encode<Sqlite>>::encode_by_ref(b, buf),
            BindValue::Timestamp(Some(t)) => <DateTime<Utc> as Encode<Sqlite>>::encode_by_ref(t, buf),
            BindValue::Int(None) | BindValue::Text(None) | BindValue::Bytes(None) | BindValue::Timestamp(None) => {
                Ok(IsNull::Yes)
            }
        }
    }
}

impl Type<Sqlite> for BindValue {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}
