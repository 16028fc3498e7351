use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ai_llm_service::AiLlmError),

    #[error("failed to build FAQ index: {0}")]
    Index(#[from] rag_store::RagError),

    #[error("failed to create web search client: {0}")]
    Search(#[from] web_search::SearchError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("{0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    /// Maps a chat failure to a 500. `details` carries the debug rendering
    /// of the error chain when `expose_details` is set.
    pub fn from_chat(err: ContextorError, expose_details: bool) -> Self {
        error!(error = %err, "chat request failed");
        let code = match &err {
            ContextorError::Rag(_) => "RETRIEVAL_FAILED",
            ContextorError::Llm(_) => "LLM_FAILED",
        };
        AppError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code,
            message: err.to_string(),
            details: expose_details.then(|| format!("{err:?}")),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx, startup-only
            AppError::Config(_)
            | AppError::Index(_)
            | AppError::Search(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Index(_) => "INDEX_ERROR",
            AppError::Search(_) => "SEARCH_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let error = self.to_string();
        let details = match self {
            AppError::Http { details, .. } => details,
            _ => None,
        };
        (status, Json(ErrorBody { error, code, details })).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
