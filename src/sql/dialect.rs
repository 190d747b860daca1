//! Placeholder syntax and generated-key retrieval per driver.

/// The two SQL dialects the store can talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

/// How the surrogate id of a freshly inserted row is obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertStrategy {
    /// `INSERT ... RETURNING "<id>"` inside a transaction.
    Returning,
    /// Plain insert, then the driver's last inserted rowid.
    LastInsertId,
}

impl Dialect {
    pub fn insert_strategy(self) -> InsertStrategy {
        match self {
            Dialect::Postgres => InsertStrategy::Returning,
            Dialect::Sqlite => InsertStrategy::LastInsertId,
        }
    }

    /// Rewrite neutral `?` placeholders into the dialect's own form.
    /// Question marks inside single-quoted literals are kept as they are.
    pub fn rebind(self, sql: &str) -> String {
        match self {
            Dialect::Sqlite => sql.to_owned(),
            Dialect::Postgres => {
                let mut out = String::with_capacity(sql.len() + 8);
                let mut n = 0u32;
                let mut in_literal = false;
                for c in sql.chars() {
                    match c {
                        '\'' => {
                            in_literal = !in_literal;
                            out.push(c);
                        }
                        '?' if !in_literal => {
                            n += 1;
                            out.push('$');
                            out.push_str(&n.to_string());
                        }
                        _ => out.push(c),
                    }
                }
                out
            }
        }
    }
}
