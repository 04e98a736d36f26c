// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_admin, require_authentication, require_ownership, Identity},
    models::{CreateNoteRequest, Note},
    state::AppState,
    storage::KeyRecord,
};

pub mod admin;
pub mod health;
pub mod notes;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    // Gated on ownership of the note named in the path.
    let owned_notes = Router::new()
        .route(
            "/notes/{note_id}",
            get(notes::get_note).delete(notes::delete_note),
        )
        .route_layer(from_fn_with_state(
            state.note_gate(),
            require_ownership::<Note>,
        ));

    let admin_keys = Router::new()
        .route("/admin/keys/{user_id}", get(admin::get_key_record))
        .route_layer(from_fn(require_admin));

    // Authentication wraps every gate added above.
    let v1_routes = Router::new()
        .route("/me", get(users::me))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/admin/notes", get(admin::list_all_notes))
        .merge(owned_notes)
        .merge(admin_keys)
        .route_layer(from_fn_with_state(
            state.auth.clone(),
            require_authentication,
        ));

    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    MakeRequestUuid,
                ))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(TraceLayer::new_for_http()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::me,
        notes::create_note,
        notes::list_notes,
        notes::get_note,
        notes::delete_note,
        admin::list_all_notes,
        admin::get_key_record,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Identity,
            Note,
            CreateNoteRequest,
            KeyRecord,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Users", description = "Caller identity"),
        (name = "Notes", description = "Owner-scoped notes"),
        (name = "Admin", description = "Admin-only operations"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

/// Declares the `bearer` scheme referenced by the secured paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
