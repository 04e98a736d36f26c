// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note endpoints.
//!
//! Single-note routes sit behind the ownership gate, which loads the note
//! and hands it to the handler as [`Authorized<Note>`].

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    auth::{Auth, Authorized},
    error::{ApiError, RouteError},
    models::{CreateNoteRequest, Note},
    state::AppState,
};

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/v1/notes",
    tag = "Notes",
    security(("bearer" = [])),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing user, key or credential"),
        (status = 403, description = "Invalid credential"),
    )
)]
pub async fn create_note(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), RouteError> {
    request.validate()?;

    let note = request.into_note(identity.user_id);
    state.notes.insert(note.clone()).await;
    tracing::info!(note_id = %note.id, owner = %note.owner, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// List the caller's own notes.
#[utoipa::path(
    get,
    path = "/v1/notes",
    tag = "Notes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Notes owned by the caller", body = [Note]),
        (status = 401, description = "Missing user, key or credential"),
    )
)]
pub async fn list_notes(Auth(identity): Auth, State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.notes.list_by_owner(&identity.user_id).await)
}

/// Get a note. Only its owner or an admin may read it.
#[utoipa::path(
    get,
    path = "/v1/notes/{note_id}",
    tag = "Notes",
    security(("bearer" = [])),
    params(
        ("note_id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note", body = Note),
        (status = 403, description = "Not your note"),
        (status = 404, description = "Note not found"),
    )
)]
pub async fn get_note(Extension(Authorized(note)): Extension<Authorized<Note>>) -> Json<Note> {
    Json(note)
}

/// Delete a note. Only its owner or an admin may delete it.
#[utoipa::path(
    delete,
    path = "/v1/notes/{note_id}",
    tag = "Notes",
    security(("bearer" = [])),
    params(
        ("note_id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 403, description = "Not your note"),
        (status = 404, description = "Note not found"),
    )
)]
pub async fn delete_note(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Extension(Authorized(note)): Extension<Authorized<Note>>,
) -> Result<StatusCode, ApiError> {
    // Another request may have removed it since the gate loaded it.
    state
        .notes
        .remove(&note.id)
        .await
        .ok_or_else(|| ApiError::not_found("Item not found!"))?;

    tracing::info!(note_id = %note.id, deleted_by = %identity.user_id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
