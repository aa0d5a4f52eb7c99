// Error taxonomy for the service, built on thiserror.
use thiserror::Error;

pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username or password missing")]
    MissingCredentials,

    #[error("Username already registered")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Password does not match")]
    InvalidSecret,

    #[error("No bearer token supplied")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Title or description missing")]
    MissingFields,

    #[error("Task {0} not found")]
    NotFound(String),

    #[error("Malformed request body: {0}")]
    InvalidBody(String),

    #[error("Request body too large")]
    BodyTooLarge,

    // Everything below is an internal failure and surfaces as a generic 500.
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token signing error: {0}")]
    TokenIssue(#[from] jsonwebtoken::errors::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::Serialization(_)
                | AppError::Hash(_)
                | AppError::TokenIssue(_)
                | AppError::Join(_)
        )
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
