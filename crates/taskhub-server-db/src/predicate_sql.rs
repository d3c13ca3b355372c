// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lowering of [`Predicate`] trees into parameterized SQLite `WHERE` clauses.
//!
//! Column names come from a fixed allowlist and every operand is bound with
//! `?`, so no request value is ever spliced into the SQL text.

use taskhub_core::{CompareOp, FilterValue, Predicate, TaskField};

use crate::timestamp::format_timestamp;

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
	Text(String),
	Integer(i64),
}

/// A `WHERE` fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
	pub sql: String,
	pub binds: Vec<SqlValue>,
}

/// How case-insensitive substring conditions are expressed.
///
/// Both strategies match against the lower-cased shadow columns the
/// repository writes alongside the text, never against SQLite `lower()`,
/// and both match the same rows. `Like` is the portable form; `Instr`
/// avoids wildcard escaping. Neither can use an ordinary index, so a table
/// that outgrows a scan should add a dedicated search strategy here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubstringStrategy {
	/// `col_lower LIKE '%needle%' ESCAPE '\'`
	#[default]
	Like,
	/// `instr(col_lower, needle) > 0`
	Instr,
}

/// Column holding `field` in the `tasks` table.
pub fn task_column(field: TaskField) -> &'static str {
	match field {
		TaskField::Title => "title",
		TaskField::Description => "description",
		TaskField::Status => "status",
		TaskField::Priority => "priority",
		TaskField::OwnerId => "user_id",
		TaskField::IsActive => "is_active",
		TaskField::DueDate => "due_date",
		TaskField::CreatedAt => "created_at",
	}
}

/// Lower-cased shadow column searched for `field`, if it is a text field.
pub fn folded_column(field: TaskField) -> Option<&'static str> {
	match field {
		TaskField::Title => Some("title_lower"),
		TaskField::Description => Some("description_lower"),
		_ => None,
	}
}

/// Lower with the default [`SubstringStrategy::Like`].
pub fn lower_predicate(predicate: &Predicate) -> SqlFilter {
	lower_predicate_with(predicate, SubstringStrategy::default())
}

pub fn lower_predicate_with(predicate: &Predicate, strategy: SubstringStrategy) -> SqlFilter {
	let mut filter = SqlFilter {
		sql: String::new(),
		binds: Vec::new(),
	};
	write_predicate(predicate, strategy, &mut filter);
	filter
}

fn write_predicate(predicate: &Predicate, strategy: SubstringStrategy, out: &mut SqlFilter) {
	match predicate {
		Predicate::True => out.sql.push_str("1=1"),
		Predicate::Compare { field, op, value } => {
			out.sql.push_str(task_column(*field));
			out.sql.push(' ');
			out.sql.push_str(match op {
				CompareOp::Eq => "=",
				CompareOp::Gte => ">=",
				CompareOp::Lte => "<=",
			});
			out.sql.push_str(" ?");
			out.binds.push(to_sql_value(value));
		}
		Predicate::Contains { field, needle } => {
			// Non-text fields never contain text.
			let Some(column) = folded_column(*field) else {
				out.sql.push_str("1=0");
				return;
			};
			match strategy {
				SubstringStrategy::Like => {
					out.sql.push_str(&format!("{column} LIKE ? ESCAPE '\\'"));
					out.binds
						.push(SqlValue::Text(format!("%{}%", escape_like(needle))));
				}
				SubstringStrategy::Instr => {
					out.sql.push_str(&format!("instr({column}, ?) > 0"));
					out.binds.push(SqlValue::Text(needle.clone()));
				}
			}
		}
		Predicate::Or(parts) => write_group(parts, " OR ", "1=0", strategy, out),
		Predicate::And(parts) => write_group(parts, " AND ", "1=1", strategy, out),
	}
}

fn write_group(
	parts: &[Predicate],
	sep: &str,
	empty: &str,
	strategy: SubstringStrategy,
	out: &mut SqlFilter,
) {
	if parts.is_empty() {
		out.sql.push_str(empty);
		return;
	}
	out.sql.push('(');
	for (i, part) in parts.iter().enumerate() {
		if i > 0 {
			out.sql.push_str(sep);
		}
		write_predicate(part, strategy, out);
	}
	out.sql.push(')');
}

fn to_sql_value(value: &FilterValue) -> SqlValue {
	match value {
		FilterValue::Text(s) => SqlValue::Text(s.clone()),
		FilterValue::Status(s) => SqlValue::Text(s.as_str().to_string()),
		FilterValue::Priority(p) => SqlValue::Text(p.as_str().to_string()),
		FilterValue::Uuid(u) => SqlValue::Text(u.to_string()),
		FilterValue::Bool(b) => SqlValue::Integer(i64::from(*b)),
		FilterValue::Timestamp(t) => SqlValue::Text(format_timestamp(t)),
	}
}

/// Escape `LIKE` wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
	let mut escaped = String::with_capacity(needle.len());
	for c in needle.chars() {
		if matches!(c, '\\' | '%' | '_') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

/// Bind every [`SqlValue`] of a filter onto a `query` or `query_as` builder.
macro_rules! bind_values {
	($query:expr, $values:expr) => {{
		let mut query = $query;
		for value in $values {
			query = match value {
				$crate::predicate_sql::SqlValue::Text(s) => query.bind(s.clone()),
				$crate::predicate_sql::SqlValue::Integer(i) => query.bind(*i),
			};
		}
		query
	}};
}

pub(crate) use bind_values;

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};
	use taskhub_core::{compose, TaskFilterCriteria, TaskPriority, TaskStatus, UserId};
	use uuid::Uuid;

	#[test]
	fn true_lowers_to_tautology() {
		let filter = lower_predicate(&Predicate::True);
		assert_eq!(filter.sql, "1=1");
		assert!(filter.binds.is_empty());
	}

	#[test]
	fn empty_or_matches_nothing() {
		assert_eq!(lower_predicate(&Predicate::Or(vec![])).sql, "1=0");
	}

	#[test]
	fn equality_binds_wire_names() {
		let filter = lower_predicate(&Predicate::eq(TaskField::Status, TaskStatus::InProgress));
		assert_eq!(filter.sql, "status = ?");
		assert_eq!(filter.binds, vec![SqlValue::Text("IN_PROGRESS".into())]);
	}

	#[test]
	fn bool_binds_as_integer() {
		let filter = lower_predicate(&Predicate::eq(TaskField::IsActive, false));
		assert_eq!(filter.sql, "is_active = ?");
		assert_eq!(filter.binds, vec![SqlValue::Integer(0)]);
	}

	#[test]
	fn owner_binds_hyphenated_uuid() {
		let uuid = Uuid::from_u128(0x1234);
		let filter = lower_predicate(&Predicate::eq(TaskField::OwnerId, UserId(uuid)));
		assert_eq!(filter.sql, "user_id = ?");
		assert_eq!(filter.binds, vec![SqlValue::Text(uuid.to_string())]);
	}

	#[test]
	fn like_escapes_wildcards() {
		let filter = lower_predicate(&Predicate::contains(TaskField::Title, "50%_off\\"));
		assert_eq!(filter.sql, "title_lower LIKE ? ESCAPE '\\'");
		assert_eq!(filter.binds, vec![SqlValue::Text("%50\\%\\_off\\\\%".into())]);
	}

	#[test]
	fn instr_binds_raw_needle() {
		let filter = lower_predicate_with(
			&Predicate::contains(TaskField::Description, "50%"),
			SubstringStrategy::Instr,
		);
		assert_eq!(filter.sql, "instr(description_lower, ?) > 0");
		assert_eq!(filter.binds, vec![SqlValue::Text("50%".into())]);
	}

	#[test]
	fn contains_on_non_text_field_matches_nothing() {
		let filter = lower_predicate(&Predicate::contains(TaskField::Status, "pend"));
		assert_eq!(filter.sql, "1=0");
		assert!(filter.binds.is_empty());
	}

	#[test]
	fn composed_criteria_lowers_in_stable_order() {
		let from = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
		let to = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
		let criteria = TaskFilterCriteria {
			search_text: Some("Deploy".into()),
			priority: Some(TaskPriority::High),
			due_date_from: Some(from),
			due_date_to: Some(to),
			..Default::default()
		};
		let filter = lower_predicate(&compose(&criteria));
		assert_eq!(
			filter.sql,
			"((title_lower LIKE ? ESCAPE '\\' OR description_lower LIKE ? ESCAPE '\\') \
			 AND priority = ? AND due_date >= ? AND due_date <= ?)"
		);
		assert_eq!(
			filter.binds,
			vec![
				SqlValue::Text("%deploy%".into()),
				SqlValue::Text("%deploy%".into()),
				SqlValue::Text("HIGH".into()),
				SqlValue::Text("2025-01-01T00:00:00.000000Z".into()),
				SqlValue::Text("2025-01-31T00:00:00.000000Z".into()),
			]
		);
	}

	#[test]
	fn placeholder_count_matches_binds() {
		let criteria = TaskFilterCriteria {
			search_text: Some("x".into()),
			status: Some(TaskStatus::Pending),
			owner_id: Some(UserId::new()),
			is_active: Some(true),
			created_from: Some(Utc::now()),
			..Default::default()
		};
		let filter = lower_predicate(&compose(&criteria));
		assert_eq!(filter.sql.matches('?').count(), filter.binds.len());
	}
}
