// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints.
//!
//! `/v1/admin/notes` checks the role through the [`AdminOnly`] extractor;
//! the `/v1/admin/keys` routes are mounted behind the `require_admin`
//! middleware instead.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::{AdminOnly, AuthError},
    error::{ApiError, RouteError},
    models::Note,
    state::AppState,
    storage::KeyRecord,
};

/// List every note regardless of owner.
#[utoipa::path(
    get,
    path = "/v1/admin/notes",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All notes", body = [Note]),
        (status = 403, description = "Admin role required"),
    )
)]
pub async fn list_all_notes(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
) -> Json<Vec<Note>> {
    tracing::info!(admin = %admin.user_id, "Admin listed all notes");
    Json(state.notes.list().await)
}

/// Look up a user's key record.
#[utoipa::path(
    get,
    path = "/v1/admin/keys/{user_id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Key record", body = KeyRecord),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "No key for this user"),
    )
)]
pub async fn get_key_record(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<KeyRecord>, RouteError> {
    let record = state
        .auth
        .key_store()
        .find_key_record(&user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "key store lookup failed");
            AuthError::from(e)
        })?
        .ok_or_else(|| ApiError::not_found(format!("No key for user {user_id}")))?;

    Ok(Json(record))
}
