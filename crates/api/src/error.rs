use actix_web::{http::StatusCode, HttpResponse};
use cuthub_api_structs::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutHubError {
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    /// The reminders job failed before it could finish
    #[error("Failed to send reminders")]
    ReminderRunFailed(String),
}

impl actix_web::error::ResponseError for CutHubError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::ReminderRunFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            Self::ReminderRunFailed(details) => Some(details.clone()),
            Self::Unauthorized(_) => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details,
        })
    }
}
