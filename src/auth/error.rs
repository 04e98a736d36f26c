// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gate rejections.
//!
//! Every gate either passes the request on or halts it with exactly one
//! [`AuthError`]. The boundary renders it as an HTTP status plus a
//! `{ "message": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::storage::StoreError;

/// Which identity-establishing input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No `x-user-id` header
    User,
    /// No key record for the asserted user
    Key,
    /// No `authorization` header
    Credential,
}

/// Authentication and authorization error type.
#[derive(Debug)]
pub enum AuthError {
    /// Identity could not be established (401)
    Unauthenticated(MissingInput),
    /// Credential present but malformed, expired or wrongly signed (403)
    Forbidden,
    /// Referenced resource does not exist (404)
    NotFound,
    /// Authenticated identity may not access the resource (403)
    Unauthorized,
    /// A downstream gate ran before authentication attached an identity
    MissingIdentity,
    /// The key store failed
    Store(StoreError),
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden | AuthError::Unauthorized => StatusCode::FORBIDDEN,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::MissingIdentity | AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Unauthenticated(MissingInput::User) => write!(f, "Not found user"),
            AuthError::Unauthenticated(MissingInput::Key) => write!(f, "Not found key"),
            AuthError::Unauthenticated(MissingInput::Credential) => write!(f, "Unauthorized"),
            AuthError::Forbidden => write!(f, "Forbidden"),
            AuthError::NotFound => write!(f, "Item not found!"),
            AuthError::Unauthorized => write!(f, "Unauthorized access!"),
            AuthError::MissingIdentity => write!(f, "Internal server error"),
            AuthError::Store(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Store(e)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingIdentity => {
                tracing::error!("authorization gate reached without an authenticated identity")
            }
            AuthError::Store(e) => tracing::error!(error = %e, "key store lookup failed"),
            _ => tracing::debug!(status = %self.status_code(), reason = %self, "request rejected"),
        }

        let status = self.status_code();
        let body = Json(AuthErrorBody {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
