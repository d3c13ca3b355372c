// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for taskhub.
//!
//! This crate holds everything that does not touch I/O:
//! - Entity types ([`Task`], [`User`]) and their typed identifiers
//! - The [`filter`] module, which turns a [`TaskFilterCriteria`] into a
//!   [`Predicate`] tree that storage backends lower into their query language
//! - Paging descriptors ([`PageRequest`]) and the [`Page`] result wrapper

pub mod error;
pub mod filter;
pub mod ids;
pub mod page;
pub mod task;
pub mod user;

pub use error::{CoreError, Result};
pub use filter::{
	compose, evaluate, with_filters, CompareOp, FilterRecord, FilterValue, Predicate, TaskField,
	TaskFilterCriteria,
};
pub use ids::{TaskId, UserId};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField, TaskSortField, UserSortField};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
