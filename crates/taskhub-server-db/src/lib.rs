// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # taskhub-server-db
//!
//! SQLite persistence for taskhub via sqlx.
//!
//! ## Repository Pattern
//!
//! Each entity has a `*Store` trait describing the operations and a
//! `*Repository` struct implementing it over a `SqlitePool`. Inherent methods
//! carry the SQL and `#[tracing::instrument]`; the trait impl delegates.
//!
//! | Operation | Return type |
//! |-----------|-------------|
//! | Get by ID/unique key | `Result<Option<T>>` |
//! | Paged search | `Result<(Vec<T>, i64)>` with the total match count |
//! | Create / update | `Result<()>` |
//! | Delete | `Result<bool>` (true if a row was affected) |
//!
//! ## Filtering
//!
//! Task searches take a [`taskhub_core::Predicate`]. [`predicate_sql`] lowers it
//! into a parameterized `WHERE` clause; the repository adds `ORDER BY` from a
//! column allowlist and a `LIMIT`/`OFFSET` window.

mod error;
pub mod pool;
pub mod predicate_sql;
pub mod schema;
pub mod task;
mod timestamp;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use error::{DbError, Result};
pub use pool::create_pool;
pub use predicate_sql::{lower_predicate, lower_predicate_with, SqlFilter, SqlValue, SubstringStrategy};
pub use schema::run_migrations;
pub use task::{TaskRepository, TaskStore};
pub use user::{UserRepository, UserStore};
