// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};

use crate::ids::UserId;
use crate::task::{TaskPriority, TaskStatus};

/// Optional filter values for a single task search.
///
/// Built once per request from already-validated input and discarded after
/// the query runs. A `None` field means "not requested", never "must be null".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilterCriteria {
	/// Case-insensitive substring matched against title or description.
	pub search_text: Option<String>,
	pub status: Option<TaskStatus>,
	pub priority: Option<TaskPriority>,
	pub owner_id: Option<UserId>,
	pub is_active: Option<bool>,
	pub due_date_from: Option<DateTime<Utc>>,
	pub due_date_to: Option<DateTime<Utc>>,
	pub created_from: Option<DateTime<Utc>>,
	pub created_to: Option<DateTime<Utc>>,
}

impl TaskFilterCriteria {
	/// Criteria that only restricts the owning user.
	pub fn owned_by(owner_id: UserId) -> Self {
		Self {
			owner_id: Some(owner_id),
			..Default::default()
		}
	}

	/// True when no field is set. Blank search text counts as unset.
	pub fn is_empty(&self) -> bool {
		self.search_text
			.as_deref()
			.map_or(true, |s| s.trim().is_empty())
			&& self.status.is_none()
			&& self.priority.is_none()
			&& self.owner_id.is_none()
			&& self.is_active.is_none()
			&& self.due_date_from.is_none()
			&& self.due_date_to.is_none()
			&& self.created_from.is_none()
			&& self.created_to.is_none()
	}
}
