// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::cmp::Ordering;

use super::predicate::{CompareOp, FilterValue, Predicate, TaskField};
use crate::task::Task;

/// A record whose fields a [`Predicate`] can inspect.
pub trait FilterRecord {
	/// Current value of `field`, or `None` when the record has no value for it.
	fn field_value(&self, field: TaskField) -> Option<FilterValue>;
}

impl FilterRecord for Task {
	fn field_value(&self, field: TaskField) -> Option<FilterValue> {
		match field {
			TaskField::Title => Some(FilterValue::Text(self.title.clone())),
			TaskField::Description => self.description.clone().map(FilterValue::Text),
			TaskField::Status => Some(self.status.into()),
			TaskField::Priority => Some(self.priority.into()),
			TaskField::OwnerId => Some(self.owner_id.into()),
			TaskField::IsActive => Some(self.is_active.into()),
			TaskField::DueDate => self.due_date.map(FilterValue::Timestamp),
			TaskField::CreatedAt => Some(self.created_at.into()),
		}
	}
}

/// Evaluate `predicate` against a single record.
///
/// A missing field never satisfies a comparison or substring match, the same
/// way a SQL `NULL` column fails `=`, `>=`, `<=` and `LIKE`.
pub fn evaluate<R>(predicate: &Predicate, record: &R) -> bool
where
	R: FilterRecord + ?Sized,
{
	match predicate {
		Predicate::True => true,
		Predicate::Compare { field, op, value } => {
			let Some(actual) = record.field_value(*field) else {
				return false;
			};
			match (op, actual.compare(value)) {
				(_, None) => false,
				(CompareOp::Eq, Some(ord)) => ord == Ordering::Equal,
				(CompareOp::Gte, Some(ord)) => ord != Ordering::Less,
				(CompareOp::Lte, Some(ord)) => ord != Ordering::Greater,
			}
		}
		Predicate::Contains { field, needle } => match record.field_value(*field) {
			Some(FilterValue::Text(text)) => text.to_lowercase().contains(needle.as_str()),
			_ => false,
		},
		Predicate::Or(parts) => parts.iter().any(|p| evaluate(p, record)),
		Predicate::And(parts) => parts.iter().all(|p| evaluate(p, record)),
	}
}
