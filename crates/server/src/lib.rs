use api_types::Message;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{router, run_with_listener};

mod expenses;
mod extract;
mod health;
mod server;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{Credentials, LoginResponse, UserListResponse, UserView};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseListResponse, ExpenseNew, ExpenseResponse, ExpenseUpdate, ExpenseView,
        };
    }
}

/// Error returned by every handler, rendered as `{success: false, message}`.
pub enum ServerError {
    Engine(EngineError),
    /// Request body could not be read as the expected JSON payload.
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidField(_) => StatusCode::BAD_REQUEST,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Message::failure(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
