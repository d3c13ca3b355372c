// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request validation for API handlers.
//!
//! Handlers receive raw strings from query parameters and JSON bodies. The
//! functions here turn them into typed values, collecting every field error
//! of a request into a single [`ServerError::Validation`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use taskhub_core::{
	Task, TaskFilterCriteria, TaskId, TaskPriority, TaskStatus, User, UserId,
};
use taskhub_server_api::{
	CreateTaskRequest, CreateUserRequest, FieldError, TaskSearchParams, UpdateTaskRequest,
	UpdateUserRequest,
};

use crate::error::ServerError;

/// Accumulates field errors across a whole request.
#[derive(Debug, Default)]
pub struct Validator {
	errors: Vec<FieldError>,
}

impl Validator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, field: &str, message: impl Into<String>) {
		self.errors.push(FieldError::new(field, message));
	}

	/// Record the error of `result` under `field`, returning the value on success.
	pub fn check<T, E: std::fmt::Display>(
		&mut self,
		field: &str,
		result: std::result::Result<T, E>,
	) -> Option<T> {
		match result {
			Ok(value) => Some(value),
			Err(e) => {
				self.push(field, e.to_string());
				None
			}
		}
	}

	/// `Ok(())` when nothing was recorded.
	pub fn finish(self) -> Result<(), ServerError> {
		if self.errors.is_empty() {
			Ok(())
		} else {
			Err(ServerError::Validation(self.errors))
		}
	}
}

/// Join two independently validated results, keeping the field errors of both.
pub fn both<A, B>(
	a: Result<A, ServerError>,
	b: Result<B, ServerError>,
) -> Result<(A, B), ServerError> {
	match (a, b) {
		(Ok(a), Ok(b)) => Ok((a, b)),
		(Err(ServerError::Validation(mut first)), Err(ServerError::Validation(second))) => {
			first.extend(second);
			Err(ServerError::Validation(first))
		}
		(Err(e), _) | (_, Err(e)) => Err(e),
	}
}

/// Treat missing and whitespace-only parameters the same.
fn present(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

/// Sanitize an email address by trimming whitespace and lowercasing.
pub fn sanitize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

pub fn parse_user_id(raw: &str) -> Result<UserId, String> {
	raw.trim()
		.parse()
		.map_err(|_| format!("'{raw}' is not a valid UUID"))
}

pub fn parse_task_id(raw: &str) -> Result<TaskId, String> {
	raw.trim()
		.parse()
		.map_err(|_| format!("'{raw}' is not a valid UUID"))
}

/// Parse a path id, failing the request with a field error named `id`.
pub fn path_user_id(raw: &str) -> Result<UserId, ServerError> {
	parse_user_id(raw).map_err(|e| ServerError::field("id", e))
}

pub fn path_task_id(raw: &str) -> Result<TaskId, ServerError> {
	parse_task_id(raw).map_err(|e| ServerError::field("id", e))
}

pub fn parse_bool(raw: &str) -> Result<bool, String> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" => Ok(true),
		"false" => Ok(false),
		_ => Err(format!("'{raw}' is not a boolean, expected true or false")),
	}
}

/// Which end of a range a bare date stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
	Start,
	End,
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a local date-time (taken as UTC), or a
/// bare date. A bare date expands to the first or last microsecond of that
/// day depending on `bound`, so `dueDateTo=2024-05-01` includes the whole day.
///
/// The UTC year must lie in `0..=9999`. Stored timestamps are compared as
/// fixed-width text and expanded years such as `+10000` would break that.
pub fn parse_timestamp(raw: &str, bound: RangeBound) -> Result<DateTime<Utc>, String> {
	let raw = raw.trim();
	let ts = parse_iso8601(raw, bound)
		.ok_or_else(|| format!("'{raw}' is not an ISO-8601 date or date-time"))?;
	if !(0..=9999).contains(&ts.year()) {
		return Err(format!("'{raw}' is out of range, the year must be between 0000 and 9999"));
	}
	Ok(ts)
}

fn parse_iso8601(raw: &str, bound: RangeBound) -> Option<DateTime<Utc>> {
	if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
		return Some(ts.with_timezone(&Utc));
	}
	if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(naive.and_utc());
	}
	let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
	let time = match bound {
		RangeBound::Start => NaiveTime::MIN,
		RangeBound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?,
	};
	Some(date.and_time(time).and_utc())
}

/// Build filter criteria from search parameters.
///
/// Every malformed field is reported. Blank parameters count as absent.
pub fn criteria_from_params(params: &TaskSearchParams) -> Result<TaskFilterCriteria, ServerError> {
	let mut v = Validator::new();

	let status = present(params.status.as_deref())
		.and_then(|s| v.check("status", s.parse::<TaskStatus>()));
	let priority = present(params.priority.as_deref())
		.and_then(|s| v.check("priority", s.parse::<TaskPriority>()));
	let owner_id =
		present(params.user_id.as_deref()).and_then(|s| v.check("userId", parse_user_id(s)));
	let is_active =
		present(params.is_active.as_deref()).and_then(|s| v.check("isActive", parse_bool(s)));
	let due_date_from = present(params.due_date_from.as_deref())
		.and_then(|s| v.check("dueDateFrom", parse_timestamp(s, RangeBound::Start)));
	let due_date_to = present(params.due_date_to.as_deref())
		.and_then(|s| v.check("dueDateTo", parse_timestamp(s, RangeBound::End)));
	let created_from = present(params.created_at_from.as_deref())
		.and_then(|s| v.check("createdAtFrom", parse_timestamp(s, RangeBound::Start)));
	let created_to = present(params.created_at_to.as_deref())
		.and_then(|s| v.check("createdAtTo", parse_timestamp(s, RangeBound::End)));

	v.finish()?;

	Ok(TaskFilterCriteria {
		search_text: present(params.search_query.as_deref()).map(str::to_string),
		status,
		priority,
		owner_id,
		is_active,
		due_date_from,
		due_date_to,
		created_from,
		created_to,
	})
}

fn check_description(v: &mut Validator, description: Option<&str>) -> Option<Option<String>> {
	match description.map(str::trim) {
		None => Some(None),
		Some("") => Some(None),
		Some(text) => v
			.check("description", Task::validate_description(text))
			.map(|_| Some(text.to_string())),
	}
}

/// Validate a create request into a new [`Task`].
///
/// The owner's existence is checked by the caller against the store.
pub fn new_task(request: &CreateTaskRequest) -> Result<Task, ServerError> {
	let mut v = Validator::new();

	let title = request.title.trim();
	v.check("title", Task::validate_title(title));
	let description = check_description(&mut v, request.description.as_deref());
	let status = present(request.status.as_deref())
		.and_then(|s| v.check("status", s.parse::<TaskStatus>()));
	let priority = present(request.priority.as_deref())
		.and_then(|s| v.check("priority", s.parse::<TaskPriority>()));
	let due_date = present(request.due_date.as_deref())
		.and_then(|s| v.check("dueDate", parse_timestamp(s, RangeBound::Start)));
	let owner_id = v.check("userId", parse_user_id(&request.user_id));

	v.finish()?;

	let owner_id = owner_id.ok_or_else(|| ServerError::field("userId", "required"))?;
	let mut task = Task::new(title, owner_id);
	task.description = description.flatten();
	task.status = status.unwrap_or(TaskStatus::Pending);
	task.priority = priority.unwrap_or(TaskPriority::Medium);
	task.due_date = due_date;
	Ok(task)
}

/// Apply the fields present in `request` to `task`.
///
/// An empty `description` or `dueDate` clears the stored value. Nothing is
/// modified unless every present field is valid.
pub fn apply_task_update(task: &mut Task, request: &UpdateTaskRequest) -> Result<(), ServerError> {
	let mut v = Validator::new();

	let title = request.title.as_deref().map(str::trim);
	if let Some(title) = title {
		v.check("title", Task::validate_title(title));
	}
	let description = request
		.description
		.as_deref()
		.map(|d| check_description(&mut v, Some(d)));
	let status = present(request.status.as_deref())
		.and_then(|s| v.check("status", s.parse::<TaskStatus>()));
	let priority = present(request.priority.as_deref())
		.and_then(|s| v.check("priority", s.parse::<TaskPriority>()));
	let due_date = request.due_date.as_deref().map(|raw| match present(Some(raw)) {
		Some(s) => v.check("dueDate", parse_timestamp(s, RangeBound::Start)),
		None => None,
	});

	v.finish()?;

	if let Some(title) = title {
		task.title = title.to_string();
	}
	if let Some(description) = description {
		task.description = description.flatten();
	}
	if let Some(status) = status {
		task.status = status;
	}
	if let Some(priority) = priority {
		task.priority = priority;
	}
	if let Some(due_date) = due_date {
		task.due_date = due_date;
	}
	if let Some(is_active) = request.is_active {
		task.is_active = is_active;
	}
	task.updated_at = Utc::now();
	Ok(())
}

pub fn parse_status_update(raw: &str) -> Result<TaskStatus, ServerError> {
	raw.parse::<TaskStatus>()
		.map_err(|e| ServerError::field("status", e))
}

fn check_full_name(v: &mut Validator, full_name: Option<&str>) -> Option<Option<String>> {
	match full_name.map(str::trim) {
		None | Some("") => Some(None),
		Some(name) => v
			.check("fullName", User::validate_full_name(name))
			.map(|_| Some(name.to_string())),
	}
}

pub fn new_user(request: &CreateUserRequest) -> Result<User, ServerError> {
	let mut v = Validator::new();

	let username = request.username.trim();
	v.check("username", User::validate_username(username));
	let email = sanitize_email(&request.email);
	v.check("email", User::validate_email(&email));
	let full_name = check_full_name(&mut v, request.full_name.as_deref());

	v.finish()?;

	let mut user = User::new(username, email);
	user.full_name = full_name.flatten();
	Ok(user)
}

/// Apply the fields present in `request` to `user`. An empty `fullName` clears it.
pub fn apply_user_update(user: &mut User, request: &UpdateUserRequest) -> Result<(), ServerError> {
	let mut v = Validator::new();

	let username = request.username.as_deref().map(str::trim);
	if let Some(username) = username {
		v.check("username", User::validate_username(username));
	}
	let email = request.email.as_deref().map(sanitize_email);
	if let Some(email) = &email {
		v.check("email", User::validate_email(email));
	}
	let full_name = request
		.full_name
		.as_deref()
		.map(|n| check_full_name(&mut v, Some(n)));

	v.finish()?;

	if let Some(username) = username {
		user.username = username.to_string();
	}
	if let Some(email) = email {
		user.email = email;
	}
	if let Some(full_name) = full_name {
		user.full_name = full_name.flatten();
	}
	user.updated_at = Utc::now();
	Ok(())
}
