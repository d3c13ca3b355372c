// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! taskhub HTTP server.
//!
//! Users own tasks; tasks can be listed, filtered and paged through a REST
//! API backed by SQLite. Filtering goes through the predicate composer in
//! `taskhub-core`, and the resulting predicate is lowered to SQL by
//! `taskhub-server-db`.

pub mod api;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use taskhub_server_config::ServerConfig;
