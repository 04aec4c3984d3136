use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mogost_common::ToolkitError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServerError::Toolkit(ToolkitError::InvalidInput(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Toolkit(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServerError::invalid_input("CSV file is empty").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Toolkit(ToolkitError::Upload("failed to retrieve uploaded file".into()))
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Toolkit(ToolkitError::Csv("bad record".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_flat() {
        let err = ServerError::invalid_input("upload exactly two files to compare");
        assert_eq!(err.to_string(), "upload exactly two files to compare");
    }
}
