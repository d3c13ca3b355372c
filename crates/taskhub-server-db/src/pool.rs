// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;

use crate::error::DbError;

/// Create a SqlitePool with WAL mode and foreign keys enforced.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./taskhub.db")
/// * `max_connections` - Upper bound on pooled connections. Use 1 for
///   `sqlite::memory:`, since every connection opens its own in-memory database.
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid, `DbError::Sqlx` if the
/// connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(max_connections.max(1))
		.connect_with(options)
		.await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

#[cfg(test)]
mod tests {
	use super::*;
	use sqlx::Row;

	#[tokio::test]
	async fn creates_missing_database_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("fresh.db");
		let pool = create_pool(&format!("sqlite:{}", path.display()), 2)
			.await
			.unwrap();

		assert!(path.exists());
		let mode: String = sqlx::query("PRAGMA journal_mode")
			.fetch_one(&pool)
			.await
			.unwrap()
			.get(0);
		assert_eq!(mode.to_lowercase(), "wal");
		let fk: i64 = sqlx::query("PRAGMA foreign_keys")
			.fetch_one(&pool)
			.await
			.unwrap()
			.get(0);
		assert_eq!(fk, 1);
	}

	#[tokio::test]
	async fn invalid_url_is_internal_error() {
		let err = create_pool("sqlite::memory:?mode=sideways", 1).await.unwrap_err();
		assert!(matches!(err, DbError::Internal(_)));
	}
}
