// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use taskhub_core::Page;

/// Raw paging query parameters.
///
/// Kept as strings so malformed values are reported alongside other field
/// errors instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
	/// Zero-based page number.
	pub page: Option<String>,
	pub size: Option<String>,
	/// `"field,direction"`, e.g. `"dueDate,asc"`.
	pub sort: Option<String>,
}

/// A page of results with its paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
	pub content: Vec<T>,
	pub page: u32,
	pub size: u32,
	pub total_elements: u64,
	pub total_pages: u64,
	pub first: bool,
	pub last: bool,
	pub empty: bool,
}

impl<T> PageResponse<T> {
	pub fn from_page<D>(page: Page<D>, f: impl FnMut(D) -> T) -> Self {
		let page = page.map(f);
		Self {
			content: page.content,
			page: page.number,
			size: page.size,
			total_elements: page.total_elements,
			total_pages: page.total_pages,
			first: page.first,
			last: page.last,
			empty: page.empty,
		}
	}
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	pub field: String,
	pub message: String,
}

impl FieldError {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable code, e.g. `not_found` or `validation_failed`.
	pub error: String,
	pub message: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub database: String,
}
