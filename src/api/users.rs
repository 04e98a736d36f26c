// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::Json;

use crate::auth::{Auth, Identity};

/// Get the identity attached to the current request.
#[utoipa::path(
    get,
    path = "/v1/me",
    tag = "Users",
    params(
        ("x-user-id" = String, Header, description = "Caller's user id")
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated identity", body = Identity),
        (status = 401, description = "Missing user, key or credential"),
        (status = 403, description = "Invalid credential"),
    )
)]
pub async fn me(Auth(identity): Auth) -> Json<Identity> {
    Json(identity)
}
