// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository.
//!
//! Usernames and emails are unique. Deleting a user removes the user's tasks
//! through the `ON DELETE CASCADE` foreign key.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePool, Row};
use taskhub_core::{PageRequest, User, UserId, UserSortField};

use crate::error::{DbError, Result};
use crate::timestamp::{format_timestamp, parse_timestamp};

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<()>;
	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
	async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
	async fn list_users(&self, page: &PageRequest<UserSortField>) -> Result<(Vec<User>, i64)>;
	async fn update_user(&self, user: &User) -> Result<()>;
	async fn delete_user(&self, id: &UserId) -> Result<bool>;
	async fn count_tasks_for_user(&self, id: &UserId) -> Result<i64>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
	id: String,
	username: String,
	email: String,
	full_name: Option<String>,
	created_at: String,
	updated_at: String,
}

impl TryFrom<UserRow> for User {
	type Error = DbError;

	fn try_from(row: UserRow) -> Result<Self> {
		Ok(User {
			id: row
				.id
				.parse()
				.map_err(|_| DbError::Internal(format!("Invalid user ID: {}", row.id)))?,
			username: row.username,
			email: row.email,
			full_name: row.full_name,
			created_at: parse_timestamp(&row.created_at, "created_at")?,
			updated_at: parse_timestamp(&row.updated_at, "updated_at")?,
		})
	}
}

fn sort_column(field: UserSortField) -> &'static str {
	match field {
		UserSortField::Username => "username",
		UserSortField::Email => "email",
		UserSortField::CreatedAt => "created_at",
	}
}

/// Turn a unique-constraint failure into `DbError::Conflict` naming the column.
fn map_unique_violation(e: sqlx::Error) -> DbError {
	match e {
		sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
			let message = db_err.message();
			if message.contains("users.username") {
				DbError::Conflict("username already taken".to_string())
			} else if message.contains("users.email") {
				DbError::Conflict("email already registered".to_string())
			} else {
				DbError::Conflict("user already exists".to_string())
			}
		}
		_ => DbError::Sqlx(e),
	}
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new user.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username or email is taken.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
	pub async fn create_user(&self, user: &User) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO users (id, username, email, full_name, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.full_name)
		.bind(format_timestamp(&user.created_at))
		.bind(format_timestamp(&user.updated_at))
		.execute(&self.pool)
		.await
		.map_err(map_unique_violation)?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(
			r#"
			SELECT id, username, email, full_name, created_at, updated_at
			FROM users
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(
			r#"
			SELECT id, username, email, full_name, created_at, updated_at
			FROM users
			WHERE username = ?
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	#[tracing::instrument(skip(self, email))]
	pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(
			r#"
			SELECT id, username, email, full_name, created_at, updated_at
			FROM users
			WHERE email = ?
			"#,
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	/// List users with paging. Returns the page and the total user count.
	#[tracing::instrument(skip(self, page), fields(page = page.page, size = page.size, sort = %page.sort))]
	pub async fn list_users(&self, page: &PageRequest<UserSortField>) -> Result<(Vec<User>, i64)> {
		let total: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM users")
			.fetch_one(&self.pool)
			.await?
			.get("cnt");

		let sql = format!(
			"SELECT id, username, email, full_name, created_at, updated_at FROM users \
			 ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
			sort_column(page.sort.field),
			page.sort.direction.as_sql(),
		);
		let offset = i64::try_from(page.offset())
			.map_err(|_| DbError::Internal("page offset out of range".to_string()))?;
		let rows = sqlx::query_as::<_, UserRow>(&sql)
			.bind(i64::from(page.size))
			.bind(offset)
			.fetch_all(&self.pool)
			.await?;

		let users = rows
			.into_iter()
			.map(TryInto::try_into)
			.collect::<Result<Vec<User>>>()?;
		Ok((users, total))
	}

	/// Overwrite username, email, full name and `updated_at`.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the user does not exist, or
	/// `DbError::Conflict` if the new username or email is taken.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<()> {
		let result = sqlx::query(
			r#"
			UPDATE users
			SET username = ?, email = ?, full_name = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.full_name)
		.bind(format_timestamp(&user.updated_at))
		.bind(user.id.to_string())
		.execute(&self.pool)
		.await
		.map_err(map_unique_violation)?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("User {}", user.id)));
		}
		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// Delete a user and, by cascade, every task they own.
	///
	/// # Returns
	/// `true` if a user was deleted, `false` if not found.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn delete_user(&self, id: &UserId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(user_id = %id, "user deleted");
		}
		Ok(deleted)
	}

	/// Number of tasks owned by a user, active or not.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn count_tasks_for_user(&self, id: &UserId) -> Result<i64> {
		let count: i64 = sqlx::query("SELECT COUNT(*) AS cnt FROM tasks WHERE user_id = ?")
			.bind(id.to_string())
			.fetch_one(&self.pool)
			.await?
			.get("cnt");
		Ok(count)
	}
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<()> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
		self.get_user_by_username(username).await
	}

	async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
		self.get_user_by_email(email).await
	}

	async fn list_users(&self, page: &PageRequest<UserSortField>) -> Result<(Vec<User>, i64)> {
		self.list_users(page).await
	}

	async fn update_user(&self, user: &User) -> Result<()> {
		self.update_user(user).await
	}

	async fn delete_user(&self, id: &UserId) -> Result<bool> {
		self.delete_user(id).await
	}

	async fn count_tasks_for_user(&self, id: &UserId) -> Result<i64> {
		self.count_tasks_for_user(id).await
	}
}
