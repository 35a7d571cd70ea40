//! Admin gate errors.

use thiserror::Error;

use crate::admin::SessionTokenError;

#[derive(Debug, Error)]
pub enum AdminGateError {
    #[error("invalid admin password")]
    InvalidPassword,

    #[error("admin session not found")]
    NotFound,

    #[error("admin session expired")]
    Expired,

    #[error("session token processing error")]
    Token(#[source] SessionTokenError),
}

impl From<SessionTokenError> for AdminGateError {
    fn from(error: SessionTokenError) -> Self {
        Self::Token(error)
    }
}
