//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config load: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the persistence core. Every SQL error carries the operation it came from.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("error connecting to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("error applying migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("error {context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("error committing {context}: {source}")]
    Commit {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    pub fn query(context: impl Into<String>, source: sqlx::Error) -> Self {
        StoreError::Query {
            context: context.into(),
            source,
        }
    }

    /// True when a by-key lookup matched no row.
    pub fn is_row_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Query {
                source: sqlx::Error::RowNotFound,
                ..
            }
        )
    }
}

/// Attach an operation prefix to a raw driver error.
pub(crate) trait QueryContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T, StoreError>;
}

impl<T> QueryContext<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::query(context, source))
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    MalformedHeader(String),
    #[error("hashing password: {0}")]
    Hash(String),
    #[error("encoding token: {0}")]
    TokenEncode(#[source] jsonwebtoken::errors::Error),
    #[error("decoding token: {0}")]
    TokenDecode(String),
}

/// Numeric error codes reported in the `errorcode` field of the envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    WrongCredentials = 1,
    QueryFailed = 2,
    MalformedAuth = 3,
    HashFailed = 4,
    TokenFailed = 5,
    JsonError = 6,
    NotAuthorized = 7,
    InvalidParameter = 8,
    NotFound = 9,
}

impl ErrorCode {
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::WrongCredentials => "Wrong Username or Password",
            ErrorCode::QueryFailed => "Database Query failed",
            ErrorCode::MalformedAuth => "Authorization request is malformed",
            ErrorCode::HashFailed => "Could not generate Hash from Password",
            ErrorCode::TokenFailed => "Could not generate Token",
            ErrorCode::JsonError => "JSON Marshal error",
            ErrorCode::NotAuthorized => "User not authorized",
            ErrorCode::InvalidParameter => "Invalid parameter",
            ErrorCode::NotFound => "Resource not found",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    WrongCredentials(String),
    #[error(transparent)]
    Query(#[from] StoreError),
    #[error("{0}")]
    MalformedAuth(String),
    #[error("{0}")]
    Hash(String),
    #[error("{0}")]
    Token(String),
    /// Request body could not be decoded.
    #[error("{0}")]
    BadJson(String),
    /// Response payload could not be encoded.
    #[error("{0}")]
    Serialize(String),
    #[error("{0}")]
    NotAuthorized(String),
    #[error("{0}")]
    InvalidParameter(String),
    #[error("{0}")]
    NotFound(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Hash(_) => AppError::Hash(e.to_string()),
            AuthError::TokenEncode(_) => AppError::Token(e.to_string()),
            AuthError::MalformedHeader(_) | AuthError::TokenDecode(_) => AppError::MalformedAuth(e.to_string()),
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::WrongCredentials(_) => ErrorCode::WrongCredentials,
            AppError::Query(e) if e.is_row_not_found() => ErrorCode::NotFound,
            AppError::Query(_) => ErrorCode::QueryFailed,
            AppError::MalformedAuth(_) => ErrorCode::MalformedAuth,
            AppError::Hash(_) => ErrorCode::HashFailed,
            AppError::Token(_) => ErrorCode::TokenFailed,
            AppError::BadJson(_) | AppError::Serialize(_) => ErrorCode::JsonError,
            AppError::NotAuthorized(_) => ErrorCode::NotAuthorized,
            AppError::InvalidParameter(_) => ErrorCode::InvalidParameter,
            AppError::NotFound(_) => ErrorCode::NotFound,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            ErrorCode::WrongCredentials | ErrorCode::MalformedAuth | ErrorCode::NotAuthorized => {
                StatusCode::UNAUTHORIZED
            }
            ErrorCode::QueryFailed | ErrorCode::HashFailed | ErrorCode::TokenFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ErrorCode::JsonError => match self {
                AppError::BadJson(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ErrorCode::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn not_authorized() -> Self {
        AppError::NotAuthorized("insufficient rights for this operation".into())
    }
}

/// `data` of an error envelope.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub httpstatus: String,
    pub errorcode: u16,
    pub errormessage: String,
}

impl From<&AppError> for ErrorBody {
    fn from(e: &AppError) -> Self {
        let code = e.code();
        ErrorBody {
            httpstatus: e.status().as_u16().to_string(),
            errorcode: code as u16,
            errormessage: format!("{}:{}", code.message(), e),
        }
    }
}

impl ErrorBody {
    /// Body for an error the router produced without a handler, e.g. an unknown
    /// method or an oversized request.
    pub fn for_status(status: StatusCode) -> Self {
        let code = if status == StatusCode::NOT_FOUND {
            ErrorCode::NotFound
        } else {
            ErrorCode::InvalidParameter
        };
        ErrorBody {
            httpstatus: status.as_u16().to_string(),
            errorcode: code as u16,
            errormessage: format!(
                "{}:{}",
                code.message(),
                status.canonical_reason().unwrap_or("request rejected")
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = ErrorBody::from(&self);
        match serde_json::to_value(&body) {
            Ok(data) => response::with_payload(status, data),
            Err(_) => status.into_response(),
        }
    }
}
