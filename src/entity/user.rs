//! User accounts and credential handling.

use serde::{Deserialize, Serialize};

use super::{merge_optional_text, merge_text, Entity};
use crate::auth::{generate_salt, hash_password};
use crate::error::{AuthError, StoreError};
use crate::service::CrudService;
use crate::sql::{BindValue, Filter};
use crate::store::Database;

/// An account. `password` holds the hex hash, never the clear text, once stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    #[serde(default)]
    pub user_id: i64,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default, skip)]
    pub salt: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub shown_name: Option<String>,
    #[serde(default)]
    pub superuser: bool,
}

/// Registration payload with the clear-text password.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub shown_name: Option<String>,
    pub superuser: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub shown_name: Option<String>,
}

impl Entity for User {
    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";
    const KEY_COLUMNS: &'static [&'static str] = &["user_id"];
    const GENERATED_KEY: Option<&'static str> = Some("user_id");
    const INSERT_COLUMNS: &'static [&'static str] =
        &["username", "password", "salt", "email", "shown_name", "superuser"];
    const UPDATE_COLUMNS: &'static [&'static str] =
        &["username", "password", "salt", "email", "shown_name", "superuser"];

    fn key_values(&self) -> Vec<BindValue> {
        vec![self.user_id.into()]
    }

    fn insert_values(&self) -> Vec<BindValue> {
        vec![
            self.username.clone().into(),
            self.password.clone().into(),
            self.salt.clone().into(),
            self.email.clone().into(),
            self.shown_name.clone().into(),
            self.superuser.into(),
        ]
    }

    fn update_values(&self) -> Vec<BindValue> {
        self.insert_values()
    }

    fn set_generated_key(&mut self, id: i64) {
        self.user_id = id;
    }
}

impl NewUser {
    /// Salt and hash the password into a storable user.
    pub fn into_user(self) -> Result<User, AuthError> {
        let salt = generate_salt();
        let password = hash_password(&self.password, &salt)?;
        Ok(User {
            user_id: 0,
            username: self.username,
            password,
            salt,
            email: self.email,
            shown_name: self.shown_name.filter(|s| !s.is_empty()),
            superuser: self.superuser,
        })
    }
}

impl User {
    pub fn with_id(user_id: i64) -> Self {
        User {
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

    /// Merge non-empty fields. A new password is hashed with the user's existing salt.
    pub fn patch(&mut self, patch: UserPatch) -> Result<(), AuthError> {
        if let Some(password) = patch.password.filter(|p| !p.is_empty()) {
            self.password = hash_password(&password, &self.salt)?;
        }
        merge_text(&mut self.username, patch.username);
        merge_text(&mut self.email, patch.email);
        merge_optional_text(&mut self.shown_name, patch.shown_name);
        Ok(())
    }

    /// Load the user with the given username.
    pub async fn get_by_username(db: &Database, username: &str) -> Result<Self, StoreError> {
        CrudService::find::<Self>(db, &Filter::by_column("username", username))
            .await?
            .ok_or_else(|| {
                StoreError::query(format!("getting user details for {}", username), sqlx::Error::RowNotFound)
            })
    }

    pub async fn does_user_exist(db: &Database, username: &str) -> Result<bool, StoreError> {
        Ok(CrudService::find::<Self>(db, &Filter::by_column("username", username))
            .await?
            .is_some())
    }

    pub async fn list(db: &Database) -> Result<Vec<Self>, StoreError> {
        CrudService::list(db, &Filter::All).await
    }

    pub async fn delete(db: &Database, user_id: i64) -> Result<u64, StoreError> {
        CrudService::delete::<Self>(db, vec![user_id.into()]).await
    }
}
