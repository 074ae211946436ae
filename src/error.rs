use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{Responder, Response};
use thiserror::Error;

/// Application-level error taxonomy. Routes return this; the store layer
/// keeps its `Option`/`Result<_, String>` signatures and routes lift those
/// into the right variant at the boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Verification failed")]
    VerificationFailed,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(what.to_string())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        AppError::Internal(msg.into())
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _req: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (Status::BadRequest, msg.clone()),
            AppError::NotFound(what) => (Status::NotFound, format!("{} not found", what)),
            AppError::Unauthenticated => (Status::Unauthorized, "Authentication required".into()),
            AppError::VerificationFailed => {
                (Status::BadRequest, "Captcha verification failed".into())
            }
            AppError::ServiceUnavailable(msg) => {
                log::error!("Service unavailable: {}", msg);
                (
                    Status::ServiceUnavailable,
                    "Something went wrong. Please try again later.".into(),
                )
            }
            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    Status::InternalServerError,
                    "Something went wrong. Please try again later.".into(),
                )
            }
        };

        let body = serde_json::json!({ "error": message }).to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
