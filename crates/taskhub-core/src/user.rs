// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::ids::UserId;

pub const MAX_FULL_NAME_LEN: usize = 100;

/// An account that owns tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub username: String,
	pub email: String,
	pub full_name: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl User {
	pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::new(),
			username: username.into(),
			email: email.into(),
			full_name: None,
			created_at: now,
			updated_at: now,
		}
	}

	/// Validate a username: 3-50 characters of ASCII letters, digits, `_`, `-` or `.`.
	pub fn validate_username(username: &str) -> Result<()> {
		let len = username.chars().count();
		if !(3..=50).contains(&len) {
			return Err(CoreError::InvalidUsername(
				"must be between 3 and 50 characters".to_string(),
			));
		}
		if !username
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
		{
			return Err(CoreError::InvalidUsername(
				"may only contain letters, digits, '_', '-' and '.'".to_string(),
			));
		}
		Ok(())
	}

	/// Structural email check: one `@`, non-empty local part, dotted domain.
	pub fn validate_email(email: &str) -> Result<()> {
		let invalid = || CoreError::InvalidEmail(email.to_string());
		if email.chars().any(char::is_whitespace) {
			return Err(invalid());
		}
		let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
		if local.is_empty() || domain.contains('@') {
			return Err(invalid());
		}
		let labels: Vec<&str> = domain.split('.').collect();
		if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
			return Err(invalid());
		}
		Ok(())
	}

	pub fn validate_full_name(full_name: &str) -> Result<()> {
		if full_name.chars().count() > MAX_FULL_NAME_LEN {
			return Err(CoreError::FullNameTooLong {
				max: MAX_FULL_NAME_LEN,
			});
		}
		Ok(())
	}
}
