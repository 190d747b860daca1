//! HTTP handlers for authentication and entity CRUD.

pub mod attendees;
pub mod auth;
pub mod comments;
pub mod events;
pub mod info;
pub mod members;
pub mod organizations;
pub mod sections;
pub mod users;

use std::collections::HashMap;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

use crate::error::AppError;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::InvalidParameter(format!("invalid id '{}'", id_str)))
}

/// Optional numeric query parameter; missing means 0 (no filter).
fn query_id(params: &HashMap<String, String>, name: &str) -> Result<i64, AppError> {
    match params.get(name) {
        Some(v) if !v.is_empty() => v
            .parse()
            .map_err(|_| AppError::InvalidParameter(format!("invalid {} '{}'", name, v))),
        _ => Ok(0),
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(v)| v).map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::InvalidParameter(e.body_text()),
        _ => AppError::BadJson(e.body_text()),
    })
}

/// Delete that matched nothing is reported as not found.
fn deleted(rows: u64, what: &str) -> Result<(), AppError> {
    if rows == 0 {
        return Err(AppError::NotFound(what.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_query_ids() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("twelve").is_err());
        let mut params = HashMap::new();
        assert_eq!(query_id(&params, "organization").unwrap(), 0);
        params.insert("organization".to_string(), "4".to_string());
        assert_eq!(query_id(&params, "organization").unwrap(), 4);
        params.insert("organization".to_string(), "x".to_string());
        assert!(query_id(&params, "organization").is_err());
    }
}
