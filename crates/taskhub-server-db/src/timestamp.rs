// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Timestamp encoding for TEXT columns.
//!
//! Values are written as RFC 3339 in UTC with exactly six fractional digits
//! and a `Z` suffix. Every stored value has the same width, so SQLite's text
//! comparison agrees with chronological order and range filters can compare
//! columns against bound strings directly.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DbError;

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
	value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column} timestamp '{value}': {e}")))
}
