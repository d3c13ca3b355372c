// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use taskhub_core::{Task, TaskPriority, TaskStatus, User, UserId};

use crate::schema::run_migrations;

/// In-memory pool with the schema applied. Limited to one connection so every
/// query sees the same database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.foreign_keys(true);
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");
	run_migrations(&pool).await.unwrap();
	pool
}

pub fn day(d: u32) -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2025, 1, d, 9, 0, 0).unwrap()
}

pub fn make_user(username: &str) -> User {
	User::new(username, format!("{username}@example.com"))
}

pub fn make_task(
	owner: UserId,
	title: &str,
	status: TaskStatus,
	priority: TaskPriority,
	created: DateTime<Utc>,
) -> Task {
	let mut task = Task::new(title, owner);
	task.status = status;
	task.priority = priority;
	task.created_at = created;
	task.updated_at = created;
	task
}
