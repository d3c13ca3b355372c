// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use crate::ids::UserId;
use crate::task::{TaskPriority, TaskStatus};

/// Task attributes a predicate may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
	Title,
	Description,
	Status,
	Priority,
	OwnerId,
	IsActive,
	DueDate,
	CreatedAt,
}

impl TaskField {
	/// Name used in API payloads and log output.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Description => "description",
			Self::Status => "status",
			Self::Priority => "priority",
			Self::OwnerId => "userId",
			Self::IsActive => "isActive",
			Self::DueDate => "dueDate",
			Self::CreatedAt => "createdAt",
		}
	}
}

impl fmt::Display for TaskField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A typed operand on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
	Text(String),
	Status(TaskStatus),
	Priority(TaskPriority),
	Uuid(Uuid),
	Bool(bool),
	Timestamp(DateTime<Utc>),
}

impl FilterValue {
	/// Order two values of the same kind. Values of different kinds are
	/// incomparable.
	///
	/// Enums order by their wire name, matching how they are stored.
	pub fn compare(&self, other: &FilterValue) -> Option<Ordering> {
		match (self, other) {
			(Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
			(Self::Status(a), Self::Status(b)) => Some(a.as_str().cmp(b.as_str())),
			(Self::Priority(a), Self::Priority(b)) => Some(a.as_str().cmp(b.as_str())),
			(Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
			(Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
			(Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
			_ => None,
		}
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => write!(f, "'{s}'"),
			Self::Status(s) => write!(f, "{s}"),
			Self::Priority(p) => write!(f, "{p}"),
			Self::Uuid(u) => write!(f, "{u}"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::Secs, true)),
		}
	}
}

impl From<TaskStatus> for FilterValue {
	fn from(value: TaskStatus) -> Self {
		Self::Status(value)
	}
}

impl From<TaskPriority> for FilterValue {
	fn from(value: TaskPriority) -> Self {
		Self::Priority(value)
	}
}

impl From<UserId> for FilterValue {
	fn from(value: UserId) -> Self {
		Self::Uuid(value.0)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<DateTime<Utc>> for FilterValue {
	fn from(value: DateTime<Utc>) -> Self {
		Self::Timestamp(value)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
	Eq,
	/// Inclusive lower bound.
	Gte,
	/// Inclusive upper bound.
	Lte,
}

impl CompareOp {
	pub fn symbol(&self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Gte => ">=",
			Self::Lte => "<=",
		}
	}
}

/// Boolean condition over a single task.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// Matches every record.
	True,
	Compare {
		field: TaskField,
		op: CompareOp,
		value: FilterValue,
	},
	/// Case-insensitive substring match. `needle` is stored lower-cased.
	Contains { field: TaskField, needle: String },
	Or(Vec<Predicate>),
	And(Vec<Predicate>),
}

impl Predicate {
	pub fn eq(field: TaskField, value: impl Into<FilterValue>) -> Self {
		Self::Compare {
			field,
			op: CompareOp::Eq,
			value: value.into(),
		}
	}

	pub fn gte(field: TaskField, value: impl Into<FilterValue>) -> Self {
		Self::Compare {
			field,
			op: CompareOp::Gte,
			value: value.into(),
		}
	}

	pub fn lte(field: TaskField, value: impl Into<FilterValue>) -> Self {
		Self::Compare {
			field,
			op: CompareOp::Lte,
			value: value.into(),
		}
	}

	pub fn contains(field: TaskField, needle: &str) -> Self {
		Self::Contains {
			field,
			needle: needle.to_lowercase(),
		}
	}

	/// Conjunction of `parts`, simplified.
	pub fn all(parts: impl IntoIterator<Item = Predicate>) -> Self {
		Self::And(parts.into_iter().collect()).simplify()
	}

	/// Disjunction of `parts`, simplified. No parts matches nothing.
	pub fn any(parts: impl IntoIterator<Item = Predicate>) -> Self {
		Self::Or(parts.into_iter().collect()).simplify()
	}

	/// True when the predicate matches every record regardless of its fields.
	pub fn is_tautology(&self) -> bool {
		match self {
			Self::True => true,
			Self::Compare { .. } | Self::Contains { .. } => false,
			Self::And(parts) => parts.iter().all(Predicate::is_tautology),
			Self::Or(parts) => parts.iter().any(Predicate::is_tautology),
		}
	}

	/// Normalize the tree without changing which records it matches.
	///
	/// - `True` operands are removed from `And`; an `Or` with a `True` operand becomes `True`
	/// - nested groups of the same kind are flattened
	/// - empty `And` becomes `True`, and single-operand groups are unwrapped
	///
	/// An empty `Or` is kept as-is and matches nothing.
	pub fn simplify(self) -> Self {
		match self {
			Self::And(parts) => {
				let mut flat = Vec::with_capacity(parts.len());
				for part in parts.into_iter().map(Predicate::simplify) {
					match part {
						Self::True => {}
						Self::And(inner) => flat.extend(inner),
						other => flat.push(other),
					}
				}
				match flat.len() {
					0 => Self::True,
					1 => flat.pop().unwrap_or(Self::True),
					_ => Self::And(flat),
				}
			}
			Self::Or(parts) => {
				let mut flat = Vec::with_capacity(parts.len());
				for part in parts.into_iter().map(Predicate::simplify) {
					match part {
						Self::True => return Self::True,
						Self::Or(inner) => flat.extend(inner),
						other => flat.push(other),
					}
				}
				if flat.len() == 1 {
					flat.pop().unwrap_or(Self::True)
				} else {
					Self::Or(flat)
				}
			}
			leaf => leaf,
		}
	}
}

impl fmt::Display for Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn join(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
			f.write_str("(")?;
			for (i, part) in parts.iter().enumerate() {
				if i > 0 {
					f.write_str(sep)?;
				}
				write!(f, "{part}")?;
			}
			f.write_str(")")
		}

		match self {
			Self::True => f.write_str("TRUE"),
			Self::Compare { field, op, value } => write!(f, "{field} {} {value}", op.symbol()),
			Self::Contains { field, needle } => write!(f, "{field} CONTAINS '{needle}'"),
			Self::Or(parts) => join(f, parts, " OR "),
			Self::And(parts) => join(f, parts, " AND "),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn status(s: TaskStatus) -> Predicate {
		Predicate::eq(TaskField::Status, s)
	}

	#[test]
	fn contains_lowercases_needle() {
		assert_eq!(
			Predicate::contains(TaskField::Title, "DePloy"),
			Predicate::Contains {
				field: TaskField::Title,
				needle: "deploy".to_string(),
			}
		);
	}

	#[test]
	fn simplify_drops_true_from_and() {
		let p = Predicate::And(vec![Predicate::True, status(TaskStatus::Pending), Predicate::True]);
		assert_eq!(p.simplify(), status(TaskStatus::Pending));
	}

	#[test]
	fn simplify_empty_and_is_true() {
		assert_eq!(Predicate::And(vec![]).simplify(), Predicate::True);
		assert_eq!(
			Predicate::And(vec![Predicate::True, Predicate::And(vec![])]).simplify(),
			Predicate::True
		);
	}

	#[test]
	fn simplify_or_with_true_is_true() {
		let p = Predicate::Or(vec![status(TaskStatus::Pending), Predicate::True]);
		assert_eq!(p.simplify(), Predicate::True);
	}

	#[test]
	fn any_of_nothing_matches_nothing() {
		let p = Predicate::any(vec![]);
		assert_eq!(p, Predicate::Or(vec![]));
		assert!(!p.is_tautology());
		assert_eq!(
			Predicate::any(vec![status(TaskStatus::Pending)]),
			status(TaskStatus::Pending)
		);
	}

	#[test]
	fn simplify_flattens_nested_groups() {
		let a = status(TaskStatus::Pending);
		let b = Predicate::eq(TaskField::IsActive, true);
		let c = Predicate::eq(TaskField::Priority, TaskPriority::High);
		let p = Predicate::And(vec![a.clone(), Predicate::And(vec![b.clone(), c.clone()])]);
		assert_eq!(p.simplify(), Predicate::And(vec![a, b, c]));
	}

	#[test]
	fn empty_or_is_kept() {
		assert_eq!(Predicate::Or(vec![]).simplify(), Predicate::Or(vec![]));
		assert!(!Predicate::Or(vec![]).is_tautology());
	}

	#[test]
	fn tautology_detection() {
		assert!(Predicate::True.is_tautology());
		assert!(Predicate::And(vec![Predicate::True, Predicate::True]).is_tautology());
		assert!(!Predicate::And(vec![Predicate::True, status(TaskStatus::Completed)]).is_tautology());
	}

	#[test]
	fn compare_rejects_mixed_kinds() {
		assert_eq!(FilterValue::Bool(true).compare(&FilterValue::Text("true".into())), None);
		assert_eq!(
			FilterValue::Text("a".into()).compare(&FilterValue::Text("b".into())),
			Some(Ordering::Less)
		);
	}

	#[test]
	fn display_renders_readable_tree() {
		let p = Predicate::And(vec![
			Predicate::Or(vec![
				Predicate::contains(TaskField::Title, "Deploy"),
				Predicate::contains(TaskField::Description, "Deploy"),
			]),
			Predicate::eq(TaskField::Priority, TaskPriority::High),
		]);
		assert_eq!(
			p.to_string(),
			"((title CONTAINS 'deploy' OR description CONTAINS 'deploy') AND priority = HIGH)"
		);
	}
}
