use actix_web::http::StatusCode;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,

    // infra things
    #[error("query execution failed")]
    QueryFailed,
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = ?err, "A DB error occurred");
        AppError::QueryFailed
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::QueryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the caller is allowed to see. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::Validation(_) => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::QueryFailed => "Internal server error",
        }
    }
}
