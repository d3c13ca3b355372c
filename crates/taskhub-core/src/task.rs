// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task entity and its enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::ids::{TaskId, UserId};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A unit of work owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
	pub id: TaskId,
	pub title: String,
	pub description: Option<String>,
	pub status: TaskStatus,
	pub priority: TaskPriority,
	pub due_date: Option<DateTime<Utc>>,
	/// Soft-delete flag. Deleting a task clears this instead of removing the row.
	pub is_active: bool,
	pub owner_id: UserId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Task {
	/// Create a new active, pending task stamped with the current time.
	pub fn new(title: impl Into<String>, owner_id: UserId) -> Self {
		let now = Utc::now();
		Self {
			id: TaskId::new(),
			title: title.into(),
			description: None,
			status: TaskStatus::Pending,
			priority: TaskPriority::Medium,
			due_date: None,
			is_active: true,
			owner_id,
			created_at: now,
			updated_at: now,
		}
	}

	/// Validate a title: non-blank and within [`MAX_TITLE_LEN`] characters.
	pub fn validate_title(title: &str) -> Result<()> {
		if title.trim().is_empty() {
			return Err(CoreError::BlankTitle);
		}
		if title.chars().count() > MAX_TITLE_LEN {
			return Err(CoreError::TitleTooLong { max: MAX_TITLE_LEN });
		}
		Ok(())
	}

	pub fn validate_description(description: &str) -> Result<()> {
		if description.chars().count() > MAX_DESCRIPTION_LEN {
			return Err(CoreError::DescriptionTooLong {
				max: MAX_DESCRIPTION_LEN,
			});
		}
		Ok(())
	}
}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
	Pending,
	InProgress,
	Completed,
	Cancelled,
}

impl TaskStatus {
	pub const ALL: [TaskStatus; 4] = [
		TaskStatus::Pending,
		TaskStatus::InProgress,
		TaskStatus::Completed,
		TaskStatus::Cancelled,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "PENDING",
			Self::InProgress => "IN_PROGRESS",
			Self::Completed => "COMPLETED",
			Self::Cancelled => "CANCELLED",
		}
	}
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TaskStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"PENDING" => Ok(Self::Pending),
			"IN_PROGRESS" => Ok(Self::InProgress),
			"COMPLETED" => Ok(Self::Completed),
			"CANCELLED" => Ok(Self::Cancelled),
			_ => Err(format!(
				"unknown task status '{s}', expected one of PENDING, IN_PROGRESS, COMPLETED, CANCELLED"
			)),
		}
	}
}

/// Relative urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
	Low,
	Medium,
	High,
}

impl TaskPriority {
	pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Low => "LOW",
			Self::Medium => "MEDIUM",
			Self::High => "HIGH",
		}
	}
}

impl fmt::Display for TaskPriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TaskPriority {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"LOW" => Ok(Self::Low),
			"MEDIUM" => Ok(Self::Medium),
			"HIGH" => Ok(Self::High),
			_ => Err(format!(
				"unknown task priority '{s}', expected one of LOW, MEDIUM, HIGH"
			)),
		}
	}
}
