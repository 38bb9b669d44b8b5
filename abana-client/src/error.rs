//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Sign-in failure reported by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account disabled")]
    UserDisabled,

    #[error("too many attempts, try again later")]
    TooManyAttempts,

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Map an Identity Toolkit error message (e.g. `INVALID_PASSWORD`)
    pub fn from_provider_code(raw: &str) -> Self {
        // Messages may carry a suffix: "TOO_MANY_ATTEMPTS_TRY_LATER : Access ..."
        let code = raw.split([' ', ':']).next().unwrap_or(raw);
        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_EMAIL" | "MISSING_PASSWORD" => Self::InvalidCredentials,
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            _ => Self::Other(raw.to_string()),
        }
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Sign-in failed
    #[error("Sign-in failed: {0}")]
    Auth(#[from] AuthError),

    /// Backend unreachable or refusing service
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) | ClientError::Unavailable(_) => ErrorCode::NetworkError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Unauthorized => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::NotAuthenticated,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Auth(AuthError::InvalidCredentials) => ErrorCode::InvalidCredentials,
            ClientError::Auth(AuthError::UserDisabled) => ErrorCode::AccountDisabled,
            ClientError::Auth(AuthError::TooManyAttempts) => ErrorCode::TooManyAttempts,
            ClientError::Auth(AuthError::Other(_)) => ErrorCode::InvalidCredentials,
            ClientError::Internal(_) => ErrorCode::DatabaseError,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_codes() {
        assert_eq!(
            AuthError::from_provider_code("INVALID_PASSWORD"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_provider_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_provider_code("TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled"),
            AuthError::TooManyAttempts
        );
        assert_eq!(
            AuthError::from_provider_code("USER_DISABLED"),
            AuthError::UserDisabled
        );
        assert_eq!(
            AuthError::from_provider_code("WEAK_PASSWORD"),
            AuthError::Other("WEAK_PASSWORD".into())
        );
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = ClientError::Auth(AuthError::InvalidCredentials).into();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);

        let err: AppError = ClientError::Unavailable("offline".into()).into();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, "Service unavailable: offline");
    }
}
