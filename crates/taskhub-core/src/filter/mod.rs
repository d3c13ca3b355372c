// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dynamic task filtering.
//!
//! A search request is parsed into a [`TaskFilterCriteria`], where every field
//! is optional. [`compose`] turns the criteria into a [`Predicate`] tree:
//!
//! - an absent field contributes [`Predicate::True`] and never narrows the result
//! - populated fields are joined with AND; there is no cross-field OR
//! - the free-text search matches title OR description, case-insensitively
//! - range bounds are inclusive, and either bound may be missing
//!
//! The tree is plain data. The database layer lowers it into parameterized
//! SQL, and [`evaluate`] runs it directly against in-memory records.
//!
//! # Example
//!
//! ```
//! use taskhub_core::{compose, Predicate, TaskFilterCriteria, TaskPriority};
//!
//! assert_eq!(compose(&TaskFilterCriteria::default()), Predicate::True);
//!
//! let criteria = TaskFilterCriteria {
//! 	search_text: Some("deploy".to_string()),
//! 	priority: Some(TaskPriority::High),
//! 	..Default::default()
//! };
//! assert!(matches!(compose(&criteria), Predicate::And(parts) if parts.len() == 2));
//! ```

mod compose;
mod criteria;
mod eval;
mod predicate;

pub use compose::{compose, contains_text, equals, with_filters, within_range, SEARCH_FIELDS};
pub use criteria::TaskFilterCriteria;
pub use eval::{evaluate, FilterRecord};
pub use predicate::{CompareOp, FilterValue, Predicate, TaskField};
