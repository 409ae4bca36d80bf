use axum::{Json, http::StatusCode};
use logrca_rag::{LlmError, RcaError};
use serde::Serialize;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// JSON error response
#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (status, Json(Self {
            error: message.into(),
            code: status.as_u16(),
        }))
    }

    pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn from_llm(err: &LlmError) -> (StatusCode, Json<Self>) {
        Self::bad_gateway(format!("Language model call failed: {}", err))
    }

    // status per failure kind; the body keeps the user-facing message
    pub fn from_rca(err: &RcaError) -> (StatusCode, Json<Self>) {
        match err {
            RcaError::UnknownService => Self::unprocessable(err.to_string()),
            RcaError::NoLogs { .. } => Self::not_found(err.to_string()),
            RcaError::Llm(e) => Self::from_llm(e),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}
