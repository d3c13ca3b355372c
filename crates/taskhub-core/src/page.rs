// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Paging descriptors and the page result wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field a listing may be sorted by.
///
/// Implementors are closed allowlists; the database layer maps each variant
/// to a fixed column name.
pub trait SortField: Copy + fmt::Debug + Send + Sync + 'static {
	/// Parse the name used in the `sort` request parameter.
	fn from_param(name: &str) -> Option<Self>;
	/// Name used in the `sort` request parameter.
	fn as_param(&self) -> &'static str;
	/// Every accepted parameter name, for error messages.
	fn allowed() -> &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}

impl SortDirection {
	/// `asc` in any case selects ascending; anything else is descending.
	pub fn parse(value: &str) -> Self {
		if value.trim().eq_ignore_ascii_case("asc") {
			Self::Asc
		} else {
			Self::Desc
		}
	}

	pub fn as_sql(&self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
	pub field: F,
	pub direction: SortDirection,
}

impl<F: SortField> Sort<F> {
	pub fn asc(field: F) -> Self {
		Self {
			field,
			direction: SortDirection::Asc,
		}
	}

	pub fn desc(field: F) -> Self {
		Self {
			field,
			direction: SortDirection::Desc,
		}
	}
}

impl<F: SortField> fmt::Display for Sort<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let dir = match self.direction {
			SortDirection::Asc => "asc",
			SortDirection::Desc => "desc",
		};
		write!(f, "{},{}", self.field.as_param(), dir)
	}
}

/// Zero-based page number, page size and ordering for one listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
	pub page: u32,
	pub size: u32,
	pub sort: Sort<F>,
}

impl<F: SortField> PageRequest<F> {
	/// A size of zero is raised to one.
	pub fn new(page: u32, size: u32, sort: Sort<F>) -> Self {
		Self {
			page,
			size: size.max(1),
			sort,
		}
	}

	pub fn offset(&self) -> u64 {
		u64::from(self.page) * u64::from(self.size)
	}
}

/// Sortable task attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
	Title,
	Status,
	Priority,
	DueDate,
	CreatedAt,
	UpdatedAt,
}

impl SortField for TaskSortField {
	fn from_param(name: &str) -> Option<Self> {
		match name.trim() {
			"title" => Some(Self::Title),
			"status" => Some(Self::Status),
			"priority" => Some(Self::Priority),
			"dueDate" => Some(Self::DueDate),
			"createdAt" => Some(Self::CreatedAt),
			"updatedAt" => Some(Self::UpdatedAt),
			_ => None,
		}
	}

	fn as_param(&self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Status => "status",
			Self::Priority => "priority",
			Self::DueDate => "dueDate",
			Self::CreatedAt => "createdAt",
			Self::UpdatedAt => "updatedAt",
		}
	}

	fn allowed() -> &'static [&'static str] {
		&["title", "status", "priority", "dueDate", "createdAt", "updatedAt"]
	}
}

/// Sortable user attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
	Username,
	Email,
	CreatedAt,
}

impl SortField for UserSortField {
	fn from_param(name: &str) -> Option<Self> {
		match name.trim() {
			"username" => Some(Self::Username),
			"email" => Some(Self::Email),
			"createdAt" => Some(Self::CreatedAt),
			_ => None,
		}
	}

	fn as_param(&self) -> &'static str {
		match self {
			Self::Username => "username",
			Self::Email => "email",
			Self::CreatedAt => "createdAt",
		}
	}

	fn allowed() -> &'static [&'static str] {
		&["username", "email", "createdAt"]
	}
}

/// One page of results plus the metadata callers need to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	pub content: Vec<T>,
	/// Zero-based page number.
	pub number: u32,
	pub size: u32,
	pub total_elements: u64,
	pub total_pages: u64,
	pub first: bool,
	pub last: bool,
	pub empty: bool,
}

impl<T> Page<T> {
	pub fn new<F: SortField>(content: Vec<T>, request: &PageRequest<F>, total_elements: u64) -> Self {
		let size = request.size.max(1);
		let total_pages = total_elements.div_ceil(u64::from(size));
		let number = request.page;
		Self {
			empty: content.is_empty(),
			content,
			number,
			size,
			total_elements,
			total_pages,
			first: number == 0,
			last: u64::from(number) + 1 >= total_pages,
		}
	}

	pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
		Page {
			content: self.content.into_iter().map(f).collect(),
			number: self.number,
			size: self.size,
			total_elements: self.total_elements,
			total_pages: self.total_pages,
			first: self.first,
			last: self.last,
			empty: self.empty,
		}
	}
}
