// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::{
	routing::{get, patch},
	Router,
};
use sqlx::SqlitePool;
use taskhub_server_config::{PaginationConfig, ServerConfig};
use taskhub_server_db::{TaskRepository, TaskStore, UserRepository, UserStore};

use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub task_repo: Arc<dyn TaskStore>,
	pub user_repo: Arc<dyn UserStore>,
	pub pagination: PaginationConfig,
}

/// Build the application state from an open pool.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	AppState {
		task_repo: Arc::new(TaskRepository::new(pool.clone())),
		user_repo: Arc::new(UserRepository::new(pool.clone())),
		pool,
		pagination: config.pagination,
	}
}

/// Build the HTTP router. Tracing and CORS layers are added by the binary.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/v1/users",
			get(routes::users::list_users).post(routes::users::create_user),
		)
		.route(
			"/api/v1/users/{id}",
			get(routes::users::get_user)
				.put(routes::users::update_user)
				.delete(routes::users::delete_user),
		)
		.route("/api/v1/users/{id}/tasks", get(routes::users::list_user_tasks))
		.route(
			"/api/v1/tasks",
			get(routes::tasks::list_tasks).post(routes::tasks::create_task),
		)
		.route(
			"/api/v1/tasks/search",
			get(routes::tasks::search_tasks).post(routes::tasks::search_tasks_body),
		)
		.route(
			"/api/v1/tasks/{id}",
			get(routes::tasks::get_task)
				.put(routes::tasks::update_task)
				.delete(routes::tasks::delete_task),
		)
		.route(
			"/api/v1/tasks/{id}/status",
			patch(routes::tasks::update_task_status),
		)
		.with_state(state)
}
