// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_core::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
	pub username: String,
	pub email: String,
	pub full_name: Option<String>,
}

/// Request to update a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	pub username: Option<String>,
	pub email: Option<String>,
	pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
	pub id: String,
	pub username: String,
	pub email: String,
	pub full_name: Option<String>,
	/// Only populated on single-user lookups.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub task_count: Option<i64>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl UserResponse {
	pub fn with_task_count(user: User, task_count: i64) -> Self {
		Self {
			task_count: Some(task_count),
			..Self::from(user)
		}
	}
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id.to_string(),
			username: user.username,
			email: user.email,
			full_name: user.full_name,
			task_count: None,
			created_at: user.created_at,
			updated_at: user.updated_at,
		}
	}
}
