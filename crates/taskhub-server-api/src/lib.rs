// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for the taskhub HTTP API. All JSON uses camelCase keys.

pub mod common;
pub mod tasks;
pub mod users;

pub use common::{ErrorResponse, FieldError, HealthResponse, PageParams, PageResponse};
pub use tasks::{
	CreateTaskRequest, TaskResponse, TaskSearchParams, TaskSearchRequest, UpdateTaskRequest,
	UpdateTaskStatusRequest,
};
pub use users::{CreateUserRequest, UpdateUserRequest, UserResponse};
