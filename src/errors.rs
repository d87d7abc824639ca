use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::api::shared::{APIError, ResponseType};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[source] anyhow::Error),

    #[error("External service error: {0}")]
    ExternalService(#[source] anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),
}

impl AppError {
    pub fn store(err: impl Into<anyhow::Error>) -> Self {
        AppError::Store(err.into())
    }

    fn cause(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Store(_) => "store",
            AppError::ExternalService(_) => "external_service",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::ConfirmationRequired(_) => "confirmation_required",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalService(anyhow::Error::new(err))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ConfirmationRequired(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{} ({})", self, status);
        } else {
            log::warn!("{} ({})", self, status);
        }

        HttpResponse::build(status).json(ResponseType::<()> {
            data: None,
            error: Some(APIError {
                cause: self.cause().to_string(),
                message: self.to_string(),
            }),
        })
    }
}
