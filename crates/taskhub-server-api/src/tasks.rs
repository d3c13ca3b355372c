// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_core::{Task, TaskPriority, TaskStatus};

/// Request to create a task.
///
/// Enum, UUID and date fields arrive as strings and are validated by the
/// server so that every invalid field can be reported at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
	pub title: String,
	pub description: Option<String>,
	/// Defaults to `PENDING`.
	pub status: Option<String>,
	/// Defaults to `MEDIUM`.
	pub priority: Option<String>,
	pub due_date: Option<String>,
	pub user_id: String,
}

/// Request to update a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
	pub title: Option<String>,
	pub description: Option<String>,
	pub status: Option<String>,
	pub priority: Option<String>,
	pub due_date: Option<String>,
	pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskStatusRequest {
	pub status: String,
}

/// Task search filters from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchParams {
	#[serde(alias = "query")]
	pub search_query: Option<String>,
	pub status: Option<String>,
	pub priority: Option<String>,
	pub user_id: Option<String>,
	pub is_active: Option<String>,
	pub due_date_from: Option<String>,
	pub due_date_to: Option<String>,
	pub created_at_from: Option<String>,
	pub created_at_to: Option<String>,
}

/// Task search filters from a JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchRequest {
	#[serde(alias = "query")]
	pub search_query: Option<String>,
	pub status: Option<String>,
	pub priority: Option<String>,
	pub user_id: Option<String>,
	pub is_active: Option<bool>,
	pub due_date_from: Option<String>,
	pub due_date_to: Option<String>,
	pub created_at_from: Option<String>,
	pub created_at_to: Option<String>,
}

impl From<TaskSearchRequest> for TaskSearchParams {
	fn from(body: TaskSearchRequest) -> Self {
		Self {
			search_query: body.search_query,
			status: body.status,
			priority: body.priority,
			user_id: body.user_id,
			is_active: body.is_active.map(|b| b.to_string()),
			due_date_from: body.due_date_from,
			due_date_to: body.due_date_to,
			created_at_from: body.created_at_from,
			created_at_to: body.created_at_to,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub status: TaskStatus,
	pub priority: TaskPriority,
	pub due_date: Option<DateTime<Utc>>,
	pub is_active: bool,
	pub user_id: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
	fn from(task: Task) -> Self {
		Self {
			id: task.id.to_string(),
			title: task.title,
			description: task.description,
			status: task.status,
			priority: task.priority,
			due_date: task.due_date,
			is_active: task.is_active,
			user_id: task.owner_id.to_string(),
			created_at: task.created_at,
			updated_at: task.updated_at,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use taskhub_core::UserId;

	#[test]
	fn query_alias_is_accepted() {
		let params: TaskSearchParams =
			serde_json::from_str(r#"{"query": "deploy", "isActive": "true"}"#).unwrap();
		assert_eq!(params.search_query.as_deref(), Some("deploy"));
		assert_eq!(params.is_active.as_deref(), Some("true"));
	}

	#[test]
	fn body_converts_bool_to_param() {
		let body: TaskSearchRequest =
			serde_json::from_str(r#"{"searchQuery": "x", "isActive": false, "createdAtFrom": "2025-01-01T00:00:00Z"}"#)
				.unwrap();
		let params = TaskSearchParams::from(body);
		assert_eq!(params.is_active.as_deref(), Some("false"));
		assert_eq!(params.created_at_from.as_deref(), Some("2025-01-01T00:00:00Z"));
	}

	#[test]
	fn task_response_shape() {
		let task = Task::new("Deploy", UserId::new());
		let owner = task.owner_id.to_string();
		let json = serde_json::to_value(TaskResponse::from(task)).unwrap();
		assert_eq!(json["status"], "PENDING");
		assert_eq!(json["priority"], "MEDIUM");
		assert_eq!(json["isActive"], true);
		assert_eq!(json["userId"], owner);
		assert!(json["dueDate"].is_null());
	}
}
