// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! [`Note`] is the per-user resource served behind the ownership gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationErrors;
use crate::storage::OwnedResource;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum body length in characters.
pub const MAX_BODY_LEN: usize = 10_000;

/// A note owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier (UUID).
    pub id: String,
    /// User id of the owner.
    pub owner: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl OwnedResource for Note {
    fn resource_id(&self) -> &str {
        &self.id
    }

    fn owner_user_id(&self) -> &str {
        &self.owner
    }
}

/// Request to create a note.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Title must be at most {MAX_TITLE_LEN} characters"),
            );
        }

        if self.body.chars().count() > MAX_BODY_LEN {
            errors.add(
                "body",
                format!("Body must be at most {MAX_BODY_LEN} characters"),
            );
        }

        errors.into_result()
    }

    /// Build the note owned by `owner`.
    pub fn into_note(self, owner: impl Into<String>) -> Note {
        Note {
            id: uuid::Uuid::new_v4().to_string(),
            owner: owner.into(),
            title: self.title.trim().to_string(),
            body: self.body,
            created_at: Utc::now(),
        }
    }
}
