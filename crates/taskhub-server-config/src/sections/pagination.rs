// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing page-size limits.

use serde::Deserialize;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
	/// Page size used when a request omits `size`.
	pub default_page_size: u32,
	/// Requested sizes above this are clamped down.
	pub max_page_size: u32,
}

impl Default for PaginationConfig {
	fn default() -> Self {
		Self {
			default_page_size: DEFAULT_PAGE_SIZE,
			max_page_size: MAX_PAGE_SIZE,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationConfigLayer {
	#[serde(default)]
	pub default_page_size: Option<u32>,
	#[serde(default)]
	pub max_page_size: Option<u32>,
}

impl PaginationConfigLayer {
	pub fn merge(&mut self, other: PaginationConfigLayer) {
		if other.default_page_size.is_some() {
			self.default_page_size = other.default_page_size;
		}
		if other.max_page_size.is_some() {
			self.max_page_size = other.max_page_size;
		}
	}

	pub fn finalize(self) -> PaginationConfig {
		PaginationConfig {
			default_page_size: self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE),
			max_page_size: self.max_page_size.unwrap_or(MAX_PAGE_SIZE),
		}
	}
}
