// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const MIGRATIONS: [(&str, &str); 2] = [
	("001_users", include_str!("../migrations/001_users.sql")),
	("002_tasks", include_str!("../migrations/002_tasks.sql")),
];

/// Create the schema if it does not exist yet.
///
/// Every statement is `CREATE ... IF NOT EXISTS`, so running this against an
/// initialised database is a no-op.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for (name, sql) in MIGRATIONS {
		for stmt in statements(sql) {
			sqlx::query(stmt).execute(pool).await?;
		}
		tracing::debug!(migration = name, "migration applied");
	}
	Ok(())
}

/// Split a migration file into statements, dropping comment-only chunks.
fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|stmt| {
		stmt.lines()
			.any(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--"))
	})
}
