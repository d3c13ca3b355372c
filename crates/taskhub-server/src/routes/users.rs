// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User HTTP handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use taskhub_core::{Page, Sort, TaskFilterCriteria, TaskSortField, User, UserSortField};
use taskhub_server_api::{
	CreateUserRequest, PageParams, PageResponse, TaskResponse, UpdateUserRequest, UserResponse,
};

use crate::{
	api::AppState,
	error::ServerError,
	extract::{ApiJson, ApiPath, ApiQuery},
	pagination::page_request,
	routes::tasks::find_page,
	validation,
};

/// Reject a username or email already held by another user.
///
/// Concurrent writers can still race past this; the unique indexes then
/// surface as `DbError::Conflict` from the store.
async fn ensure_unique(state: &AppState, user: &User) -> Result<(), ServerError> {
	if let Some(existing) = state.user_repo.get_user_by_username(&user.username).await? {
		if existing.id != user.id {
			return Err(ServerError::Conflict(format!(
				"username '{}' is already taken",
				user.username
			)));
		}
	}
	if let Some(existing) = state.user_repo.get_user_by_email(&user.email).await? {
		if existing.id != user.id {
			return Err(ServerError::Conflict(format!(
				"email '{}' is already registered",
				user.email
			)));
		}
	}
	Ok(())
}

async fn load_user(state: &AppState, raw_id: &str) -> Result<User, ServerError> {
	let id = validation::path_user_id(raw_id)?;
	state
		.user_repo
		.get_user_by_id(&id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("User {id}")))
}

/// POST /api/v1/users
#[tracing::instrument(skip(state, request), fields(username = %request.username))]
pub async fn create_user(
	State(state): State<AppState>,
	ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let user = validation::new_user(&request)?;
	ensure_unique(&state, &user).await?;
	state.user_repo.create_user(&user).await?;

	tracing::info!(user_id = %user.id, "user created");
	Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/users
#[tracing::instrument(skip(state))]
pub async fn list_users(
	State(state): State<AppState>,
	ApiQuery(page_params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse<UserResponse>>, ServerError> {
	let page = page_request(
		&page_params,
		&state.pagination,
		Sort::desc(UserSortField::CreatedAt),
	)?;
	let (users, total) = state.user_repo.list_users(&page).await?;
	let total = u64::try_from(total)
		.map_err(|_| ServerError::Internal(format!("negative user count {total}")))?;

	Ok(Json(PageResponse::from_page(
		Page::new(users, &page, total),
		UserResponse::from,
	)))
}

/// GET /api/v1/users/{id} - Includes the number of tasks the user owns.
#[tracing::instrument(skip(state))]
pub async fn get_user(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
) -> Result<Json<UserResponse>, ServerError> {
	let user = load_user(&state, &id).await?;
	let task_count = state.user_repo.count_tasks_for_user(&user.id).await?;
	Ok(Json(UserResponse::with_task_count(user, task_count)))
}

/// PUT /api/v1/users/{id}
#[tracing::instrument(skip(state, request))]
pub async fn update_user(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
	ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ServerError> {
	let mut user = load_user(&state, &id).await?;
	validation::apply_user_update(&mut user, &request)?;
	ensure_unique(&state, &user).await?;
	state.user_repo.update_user(&user).await?;

	tracing::info!(user_id = %user.id, "user updated");
	Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id} - Removes the user and every task they own.
#[tracing::instrument(skip(state))]
pub async fn delete_user(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ServerError> {
	let id = validation::path_user_id(&id)?;
	if !state.user_repo.delete_user(&id).await? {
		return Err(ServerError::NotFound(format!("User {id}")));
	}

	tracing::info!(user_id = %id, "user deleted");
	Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/tasks - Page through the tasks a user owns.
#[tracing::instrument(skip(state))]
pub async fn list_user_tasks(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
	ApiQuery(page_params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse<TaskResponse>>, ServerError> {
	let (user, page) = validation::both(
		load_user(&state, &id).await,
		page_request(
			&page_params,
			&state.pagination,
			Sort::desc(TaskSortField::CreatedAt),
		),
	)?;
	let criteria = TaskFilterCriteria::owned_by(user.id);
	Ok(Json(find_page(&state, &criteria, page).await?))
}
