// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for taskhub domain validation.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when a value violates a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
	#[error("title must not be blank")]
	BlankTitle,

	#[error("title must be at most {max} characters")]
	TitleTooLong { max: usize },

	#[error("description must be at most {max} characters")]
	DescriptionTooLong { max: usize },

	#[error("invalid username: {0}")]
	InvalidUsername(String),

	#[error("invalid email: {0}")]
	InvalidEmail(String),

	#[error("full name must be at most {max} characters")]
	FullNameTooLong { max: usize },
}
