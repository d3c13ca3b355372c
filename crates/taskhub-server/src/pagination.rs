// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared pagination utilities for API handlers.

use taskhub_core::{PageRequest, Sort, SortDirection, SortField};
use taskhub_server_api::PageParams;
use taskhub_server_config::PaginationConfig;

use crate::{error::ServerError, validation::Validator};

/// Turn raw `page`/`size`/`sort` parameters into a [`PageRequest`].
///
/// - `page` defaults to 0 and must not be negative
/// - `size` defaults to the configured page size and is clamped to `[1, max_page_size]`
/// - `sort` is `field` or `field,direction`; unknown fields are rejected
pub fn page_request<F: SortField>(
	params: &PageParams,
	config: &PaginationConfig,
	default_sort: Sort<F>,
) -> Result<PageRequest<F>, ServerError> {
	let mut v = Validator::new();

	let page = match params.page.as_deref().map(str::trim) {
		None | Some("") => Some(0),
		Some(raw) => match raw.parse::<i64>() {
			Ok(n) if n < 0 => {
				v.push("page", "must not be negative");
				None
			}
			Ok(n) => v.check(
				"page",
				u32::try_from(n).map_err(|_| format!("must be at most {}", u32::MAX)),
			),
			Err(_) => {
				v.push("page", format!("'{raw}' is not a number"));
				None
			}
		},
	};

	let size = match params.size.as_deref().map(str::trim) {
		None | Some("") => Some(config.default_page_size),
		Some(raw) => match raw.parse::<i64>() {
			Ok(n) => Some(clamp_size(n, config.max_page_size)),
			Err(_) => {
				v.push("size", format!("'{raw}' is not a number"));
				None
			}
		},
	};

	let sort = match params.sort.as_deref().map(str::trim) {
		None | Some("") => Some(default_sort),
		Some(raw) => v.check("sort", parse_sort::<F>(raw)),
	};

	v.finish()?;

	Ok(PageRequest::new(
		page.unwrap_or(0),
		size.unwrap_or(config.default_page_size),
		sort.unwrap_or(default_sort),
	))
}

fn clamp_size(requested: i64, max: u32) -> u32 {
	let max = max.max(1);
	u32::try_from(requested.clamp(1, i64::from(max))).unwrap_or(max)
}

/// Parse `field` or `field,direction`. Only `asc` in any case sorts
/// ascending; a missing or unrecognised direction sorts descending.
pub fn parse_sort<F: SortField>(raw: &str) -> Result<Sort<F>, String> {
	let (name, direction) = match raw.split_once(',') {
		Some((name, direction)) => (name.trim(), SortDirection::parse(direction)),
		None => (raw.trim(), SortDirection::Desc),
	};
	let field = F::from_param(name).ok_or_else(|| {
		format!(
			"unknown sort field '{name}', expected one of {}",
			F::allowed().join(", ")
		)
	})?;
	Ok(Sort { field, direction })
}
