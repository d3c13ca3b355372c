// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};

use super::criteria::TaskFilterCriteria;
use super::predicate::{FilterValue, Predicate, TaskField};

/// Attributes searched by the free-text filter.
pub const SEARCH_FIELDS: [TaskField; 2] = [TaskField::Title, TaskField::Description];

/// Exact-match rule. `None` yields [`Predicate::True`].
pub fn equals(field: TaskField, value: Option<FilterValue>) -> Predicate {
	match value {
		Some(value) => Predicate::eq(field, value),
		None => Predicate::True,
	}
}

/// Free-text rule over [`SEARCH_FIELDS`].
///
/// The text is trimmed and lower-cased; absent or blank text yields
/// [`Predicate::True`].
pub fn contains_text(search_text: Option<&str>) -> Predicate {
	match search_text.map(str::trim) {
		Some(text) if !text.is_empty() => Predicate::Or(
			SEARCH_FIELDS
				.iter()
				.map(|field| Predicate::contains(*field, text))
				.collect(),
		),
		_ => Predicate::True,
	}
}

/// Inclusive range rule. Each bound is optional on its own.
pub fn within_range(
	field: TaskField,
	from: Option<DateTime<Utc>>,
	to: Option<DateTime<Utc>>,
) -> Predicate {
	match (from, to) {
		(Some(from), Some(to)) => Predicate::And(vec![
			Predicate::gte(field, from),
			Predicate::lte(field, to),
		]),
		(Some(from), None) => Predicate::gte(field, from),
		(None, Some(to)) => Predicate::lte(field, to),
		(None, None) => Predicate::True,
	}
}

/// Conjunction of every per-field rule, in a fixed order, without simplification.
pub fn with_filters(criteria: &TaskFilterCriteria) -> Predicate {
	Predicate::And(vec![
		contains_text(criteria.search_text.as_deref()),
		equals(TaskField::Status, criteria.status.map(Into::into)),
		equals(TaskField::Priority, criteria.priority.map(Into::into)),
		equals(TaskField::OwnerId, criteria.owner_id.map(Into::into)),
		equals(TaskField::IsActive, criteria.is_active.map(Into::into)),
		within_range(TaskField::DueDate, criteria.due_date_from, criteria.due_date_to),
		within_range(TaskField::CreatedAt, criteria.created_from, criteria.created_to),
	])
}

/// Build the predicate for `criteria`.
///
/// Empty criteria compose to [`Predicate::True`].
pub fn compose(criteria: &TaskFilterCriteria) -> Predicate {
	with_filters(criteria).simplify()
}
