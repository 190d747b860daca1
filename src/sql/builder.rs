//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from entity metadata.
//!
//! Every statement uses the neutral `?` placeholder; [`Dialect::rebind`](super::Dialect::rebind)
//! turns it into the driver's own syntax right before execution.

use crate::entity::Entity;

use super::BindValue;

/// Quote identifier (safe: only from entity metadata).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    pub fn new(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, v: impl Into<BindValue>) -> Self {
        self.params.push(v.into());
        self
    }
}

/// Optional single-column equality filter for list queries.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    All,
    Eq { column: &'static str, value: BindValue },
}

impl Filter {
    /// Filter on a numeric id column. A non-positive id means no filter.
    pub fn by_id(column: &'static str, id: i64) -> Self {
        if column.is_empty() || id <= 0 {
            Filter::All
        } else {
            Filter::Eq {
                column,
                value: BindValue::from(id),
            }
        }
    }

    /// Filter on any column. An empty column name means no filter.
    pub fn by_column(column: &'static str, value: impl Into<BindValue>) -> Self {
        if column.is_empty() {
            Filter::All
        } else {
            Filter::Eq {
                column,
                value: value.into(),
            }
        }
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn key_condition(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("{} = ?", quoted(c)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// INSERT INTO "t" ("a", "b") VALUES (?, ?)
pub fn build_insert<E: Entity>(entity: &E) -> QueryBuf {
    let params = entity.insert_values();
    debug_assert_eq!(params.len(), E::INSERT_COLUMNS.len(), "{} insert values", E::NAME);
    let cols = E::INSERT_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ");
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted(E::TABLE),
            cols,
            placeholders(params.len())
        ),
        params,
    }
}

/// Append the generated-key clause used by the Returning insert strategy.
pub fn with_returning(sql: &str, column: &str) -> String {
    format!("{} RETURNING {}", sql, quoted(column))
}

/// UPDATE "t" SET "a" = ?, "b" = ? WHERE "k" = ?. Update values first, key values last.
pub fn build_update<E: Entity>(entity: &E) -> QueryBuf {
    let mut params = entity.update_values();
    debug_assert_eq!(params.len(), E::UPDATE_COLUMNS.len(), "{} update values", E::NAME);
    let set = E::UPDATE_COLUMNS
        .iter()
        .map(|c| format!("{} = ?", quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    params.extend(entity.key_values());
    QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {}",
            quoted(E::TABLE),
            set,
            key_condition(E::KEY_COLUMNS)
        ),
        params,
    }
}

/// SELECT * FROM "t" [WHERE "col" = ?]
pub fn build_select(table: &str, filter: &Filter) -> QueryBuf {
    let q = QueryBuf::new(format!("SELECT * FROM {}", quoted(table)));
    match filter {
        Filter::All => q,
        Filter::Eq { column, value } => QueryBuf {
            sql: format!("{} WHERE {} = ?", q.sql, quoted(column)),
            params: vec![value.clone()],
        },
    }
}

/// SELECT * FROM "t" WHERE "k1" = ? [AND "k2" = ?] LIMIT 1
pub fn build_select_by_key<E: Entity>(key: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(key.len(), E::KEY_COLUMNS.len(), "{} key values", E::NAME);
    QueryBuf {
        sql: format!(
            "SELECT * FROM {} WHERE {} LIMIT 1",
            quoted(E::TABLE),
            key_condition(E::KEY_COLUMNS)
        ),
        params: key,
    }
}

/// DELETE FROM "t" WHERE "k1" = ? [AND "k2" = ?]
pub fn build_delete<E: Entity>(key: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(key.len(), E::KEY_COLUMNS.len(), "{} key values", E::NAME);
    QueryBuf {
        sql: format!(
            "DELETE FROM {} WHERE {}",
            quoted(E::TABLE),
            key_condition(E::KEY_COLUMNS)
        ),
        params: key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Attendee, Commitment, Member, Organization};

    #[test]
    fn insert_lists_columns_and_values_in_order() {
        let org = Organization {
            organization_id: 0,
            name: "Brass Band".into(),
            picture: vec![1, 2],
        };
        let q = build_insert(&org);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "organizations" ("name", "picture") VALUES (?, ?)"#
        );
        assert_eq!(
            q.params,
            vec![BindValue::from("Brass Band"), BindValue::from(vec![1u8, 2])]
        );
    }

    #[test]
    fn update_binds_key_after_values() {
        let member = Member {
            section_id: 3,
            user_id: 7,
            rights: 2,
        };
        let q = build_update(&member);
        assert_eq!(
            q.sql,
            r#"UPDATE "members" SET "rights" = ? WHERE "section_id" = ? AND "user_id" = ?"#
        );
        assert_eq!(
            q.params,
            vec![BindValue::from(2), BindValue::from(3), BindValue::from(7)]
        );
    }

    #[test]
    fn select_without_filter() {
        assert_eq!(build_select("sections", &Filter::All).sql, r#"SELECT * FROM "sections""#);
        assert_eq!(Filter::by_id("organization_id", 0), Filter::All);
        assert_eq!(Filter::by_column("", "x"), Filter::All);
    }

    #[test]
    fn select_with_filter() {
        let q = build_select("events", &Filter::by_id("organization_id", 4));
        assert_eq!(q.sql, r#"SELECT * FROM "events" WHERE "organization_id" = ?"#);
        assert_eq!(q.params, vec![BindValue::from(4)]);
    }

    #[test]
    fn select_by_composite_key() {
        let attendee = Attendee {
            event_id: 1,
            user_id: 2,
            commitment: Commitment::Maybe,
            comment: None,
        };
        let q = build_select_by_key::<Attendee>(attendee.key_values());
        assert_eq!(
            q.sql,
            r#"SELECT * FROM "attendees" WHERE "event_id" = ? AND "user_id" = ? LIMIT 1"#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn delete_by_key() {
        let q = build_delete::<Organization>(vec![BindValue::from(9)]);
        assert_eq!(q.sql, r#"DELETE FROM "organizations" WHERE "organization_id" = ?"#);
    }

    #[test]
    fn returning_clause_quotes_column() {
        assert_eq!(
            with_returning(r#"INSERT INTO "users" ("username") VALUES (?)"#, "user_id"),
            r#"INSERT INTO "users" ("username") VALUES (?) RETURNING "user_id""#
        );
    }
}
