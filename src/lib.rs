// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Keygate - per-user public key request authorization
//!
//! Requests assert a user id in `x-user-id` and carry a bearer token signed
//! with that user's private key. The server verifies the token against the
//! user's registered public key, then applies role and ownership gates.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization gates
//! - `storage` - Key records and owned resources

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
