use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("No user found with id: {0}")]
    NotFound(i64),

    #[error("No user found with email address: {0}")]
    EmailNotFound(String),

    #[error("No user found with name: {first_name} {last_name}")]
    NameNotFound {
        first_name: String,
        last_name: String,
    },

    #[error("No approver found with id: {0}")]
    ApproverNotFound(i64),

    #[error("User already exists with id: {id}")]
    AlreadyExists { id: i64 },

    #[error("userId's do not match: {path} != {body}")]
    IdMismatch { path: i64, body: i64 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_)
            | UserError::EmailNotFound(_)
            | UserError::NameNotFound { .. }
            | UserError::ApproverNotFound(_)
            | UserError::IdMismatch { .. } => AppError::NotFound(err.to_string()),
            UserError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Database(e) => AppError::InternalServerError(e.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: UserError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_not_found_messages_name_the_identifier() {
        assert_eq!(UserError::NotFound(42).to_string(), "No user found with id: 42");
        assert_eq!(
            UserError::EmailNotFound("a@b.com".to_string()).to_string(),
            "No user found with email address: a@b.com"
        );
        assert_eq!(
            UserError::NameNotFound {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            }
            .to_string(),
            "No user found with name: John Doe"
        );
        assert_eq!(
            UserError::ApproverNotFound(7).to_string(),
            "No approver found with id: 7"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(UserError::NotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(UserError::ApproverNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(UserError::AlreadyExists { id: 1 }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(UserError::IdMismatch { path: 1, body: 2 }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(UserError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(UserError::Database(sea_orm::DbErr::Custom("down".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(UserError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_keeps_description() {
        let app: AppError =
            UserError::Database(sea_orm::DbErr::Custom("pool closed".to_string())).into();
        assert!(app.to_string().contains("pool closed"));
    }
}
