//! Standard response envelope: `{"version", "path", "data"}`.
//!
//! Handlers and [`AppError`](crate::AppError) only attach their payload to the
//! response; [`wrap_envelope`] runs as middleware around the API router and
//! fills in the version and the request path.

use axum::{
    extract::{OriginalUri, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, ErrorBody};

pub const API_VERSION: &str = "1.0.0";

#[derive(Serialize, Debug)]
pub struct Envelope {
    pub version: &'static str,
    pub path: String,
    pub data: Value,
}

/// Payload waiting to be enveloped.
#[derive(Clone, Debug)]
struct EnvelopeData(Value);

pub(crate) fn with_payload(status: StatusCode, data: Value) -> Response {
    let mut res = status.into_response();
    res.extensions_mut().insert(EnvelopeData(data));
    res
}

/// Successful response carrying a serializable payload.
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

pub fn success_ok<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        status: StatusCode::OK,
        data,
    }
}

pub fn success_created<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        status: StatusCode::CREATED,
        data,
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.data) {
            Ok(data) => with_payload(self.status, data),
            Err(e) => AppError::Serialize(e.to_string()).into_response(),
        }
    }
}

pub async fn wrap_envelope(OriginalUri(uri): OriginalUri, req: Request, next: Next) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned());
    let mut res = next.run(req).await;
    let status = res.status();
    let data = match res.extensions_mut().remove::<EnvelopeData>() {
        Some(EnvelopeData(data)) => data,
        // Rejections from the router itself (405, 413) carry no payload.
        None if status.is_client_error() => match serde_json::to_value(ErrorBody::for_status(status)) {
            Ok(data) => data,
            Err(_) => return res,
        },
        None => return res,
    };
    let envelope = Envelope {
        version: API_VERSION,
        path,
        data,
    };
    (status, Json(envelope)).into_response()
}
