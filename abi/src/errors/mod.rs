use std::error::Error as StdError;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// an identity does not resolve
    NotFound,
    /// the operation would break a relationship invariant, e.g. requesting an existing friend
    InvalidState,
    /// accept without a matching pending request on both sides
    NoSuchRequest,
    /// transient persistence failure, safe to retry
    StoreUnavailable,
    /// version contention outlived the retries, safe to retry
    Conflict,
    BadRequest,
    BodyParsing,
    PathParsing,
    UnAuthorized,
    ConfigReadError,
    ConfigParseError,
    InternalServer,
}

#[derive(Debug, Serialize)]
pub struct Error {
    kind: ErrorKind,
    details: Option<String>,
    #[serde(skip)]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    #[inline]
    pub fn new(
        kind: ErrorKind,
        details: impl Into<String>,
        source: impl StdError + 'static + Send + Sync,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn with_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            source: None,
            details: None,
        }
    }

    #[inline]
    pub fn with_details(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            source: None,
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::with_kind(ErrorKind::NotFound)
    }

    #[inline]
    pub fn not_found_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::NotFound, details)
    }

    #[inline]
    pub fn invalid_state(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::InvalidState, details)
    }

    #[inline]
    pub fn no_such_request(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::NoSuchRequest, details)
    }

    #[inline]
    pub fn store_unavailable(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::StoreUnavailable, details)
    }

    #[inline]
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::Conflict, details)
    }

    #[inline]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BadRequest, details)
    }

    #[inline]
    pub fn body_parsing(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BodyParsing, details)
    }

    #[inline]
    pub fn path_parsing(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::PathParsing, details)
    }

    #[inline]
    pub fn unauthorized_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::UnAuthorized, details)
    }

    #[inline]
    pub fn internal_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::InternalServer, details)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// the caller may repeat the operation without side effects
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::StoreUnavailable | ErrorKind::Conflict
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound | ErrorKind::NoSuchRequest => StatusCode::NOT_FOUND,
            ErrorKind::InvalidState => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::BadRequest | ErrorKind::BodyParsing | ErrorKind::PathParsing => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::UnAuthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::ConfigReadError
            | ErrorKind::ConfigParseError
            | ErrorKind::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{:?}: {}", self.kind, details),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        error!("custom error to http error {:?}", self);
        (status_code, Json(self)).into_response()
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::InternalServer, value.to_string(), value)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::ConfigParseError, value.to_string(), value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::new(ErrorKind::BadRequest, value.to_string(), value)
    }
}

// a missing row is a resolution failure, everything else from the driver is transient
impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::RowNotFound => Self::new(ErrorKind::NotFound, value.to_string(), value),
            _ => Self::new(ErrorKind::StoreUnavailable, value.to_string(), value),
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(value: tokio::time::error::Elapsed) -> Self {
        Self::new(ErrorKind::StoreUnavailable, "store call timed out", value)
    }
}
