// src/server/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::converter::ConversionError;
use crate::server::response::FailureResponse;

/// HTTP 경계에서 발생하는 모든 에러
#[derive(Debug)]
pub enum ApiError {
    /// Body missing, not JSON, not an object, or an empty object.
    EmptyBody,
    /// `uid` field absent or falsy.
    MissingUid,
    Conversion {
        uid: String,
        source: ConversionError,
    },
    NotFound,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::EmptyBody => write!(f, "request body must not be empty"),
            ApiError::MissingUid => write!(f, "uid parameter must not be empty"),
            ApiError::Conversion { source, .. } => write!(f, "{}", source),
            ApiError::NotFound => write!(f, "endpoint not found"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody | ApiError::MissingUid => StatusCode::BAD_REQUEST,
            ApiError::Conversion { source, .. } if source.is_client_error() => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Conversion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let uid = match self {
            ApiError::Conversion { uid, .. } => Some(uid.clone()),
            _ => None,
        };

        // 서버 에러는 error, 요청 에러는 warn
        match (&uid, status.is_server_error()) {
            (Some(uid), true) => tracing::error!("Failed to convert uid {:?}: {}", uid, self),
            (Some(uid), false) => tracing::warn!("Rejected uid {:?}: {}", uid, self),
            (None, true) => tracing::error!("{}", self),
            (None, false) => tracing::warn!("{}", self),
        }

        HttpResponse::build(status).json(FailureResponse::new(self.to_string(), uid))
    }
}
