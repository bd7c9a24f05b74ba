//! Error types for the server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chartspec::SpecError;
use error_stack::Report;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Report<SpecError>> for ServerError {
    fn from(report: Report<SpecError>) -> Self {
        let details: Vec<&str> = report
            .frames()
            .filter_map(|frame| frame.downcast_ref::<String>())
            .map(String::as_str)
            .collect();
        let message = if details.is_empty() {
            report.current_context().to_string()
        } else {
            format!("{} ({})", report.current_context(), details.join(", "))
        };

        match report.current_context() {
            SpecError::UnsupportedChartType
            | SpecError::InvalidDataType
            | SpecError::InvalidAggregate
            | SpecError::MalformedParams => ServerError::BadRequest(message),
            SpecError::CatalogInstalled | SpecError::Serialization => {
                ServerError::Internal(message)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
