// Shared fixtures for integration tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{TimeZone, Utc};
use oaf_server::entity::{Event, NewUser, Organization, Section, User};
use oaf_server::sql::QueryBuf;
use oaf_server::{apply_migrations, AppState, Database, DatabaseConnection, Driver};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Fresh in-memory SQLite with the schema applied.
pub async fn sqlite() -> Database {
    let db = Database::connect(&DatabaseConnection {
        driver: Driver::Sqlite,
        connection: "sqlite::memory:".into(),
    })
    .await
    .expect("connect sqlite");
    apply_migrations(&db).await.expect("migrate sqlite");
    db
}

/// PostgreSQL from `OAF_TEST_POSTGRES_URL`, emptied, when configured.
pub async fn postgres() -> Option<Database> {
    let url = std::env::var("OAF_TEST_POSTGRES_URL").ok()?;
    let db = Database::connect(&DatabaseConnection {
        driver: Driver::Postgres,
        connection: url,
    })
    .await
    .expect("connect postgres");
    apply_migrations(&db).await.expect("migrate postgres");
    db.execute(&QueryBuf::new(
        r#"TRUNCATE "comments", "attendees", "events", "members", "sections", "organizations", "info", "users" RESTART IDENTITY CASCADE"#,
    ))
    .await
    .expect("truncate postgres");
    Some(db)
}

/// Every dialect available to this test run.
pub async fn databases() -> Vec<Database> {
    let mut dbs = vec![sqlite().await];
    if let Some(pg) = postgres().await {
        dbs.push(pg);
    }
    dbs
}

pub async fn insert_user(db: &Database, username: &str, password: &str, superuser: bool) -> User {
    let mut user = NewUser {
        username: username.into(),
        password: password.into(),
        email: format!("{}@example.org", username),
        shown_name: None,
        superuser,
    }
    .into_user()
    .expect("hash password");
    user.insert(db).await.expect("insert user");
    user
}

pub async fn insert_organization(db: &Database, name: &str) -> Organization {
    let mut org = Organization {
        organization_id: 0,
        name: name.into(),
        picture: vec![0x89, 0x50, 0x4e, 0x47],
    };
    org.insert(db).await.expect("insert organization");
    org
}

pub async fn insert_section(db: &Database, organization_id: i64, name: &str) -> Section {
    let mut section = Section {
        section_id: 0,
        organization_id,
        name: name.into(),
    };
    section.insert(db).await.expect("insert section");
    section
}

pub async fn insert_event(db: &Database, organization_id: i64, creator: i64) -> Event {
    let mut event = Event {
        event_id: 0,
        organization_id,
        name: "Spring Concert".into(),
        address: None,
        start: Utc.with_ymd_and_hms(2024, 4, 20, 19, 30, 0).unwrap(),
        end: None,
        creator,
    };
    event.insert(db).await.expect("insert event");
    event
}

pub fn basic_credentials(username: &str, password: &str) -> String {
    format!("Bearer {}", STANDARD.encode(format!("{}:{}", username, password)))
}

pub fn state(db: Database) -> AppState {
    AppState::new(db, TEST_SECRET)
}

/// Request builder executed with `oneshot` against a router.
pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl TestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn patch(uri: &str) -> Self {
        Self::new(Method::PATCH, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header(header::AUTHORIZATION.as_str(), &format!("Bearer {}", token))
    }

    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("serialize body"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    pub fn raw_json(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    pub async fn send(self, app: Router) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }
        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("build request");
        let response = app.oneshot(request).await.expect("execute request");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is JSON")
        };
        (status, json)
    }
}
