// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task HTTP handlers.
//!
//! Listing and search share one path: request parameters are validated into a
//! [`TaskFilterCriteria`], composed into a predicate, and handed to the store
//! together with a page request.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use taskhub_core::{compose, Page, PageRequest, Sort, TaskFilterCriteria, TaskSortField};
use taskhub_server_api::{
	CreateTaskRequest, PageParams, PageResponse, TaskResponse, TaskSearchParams, TaskSearchRequest,
	UpdateTaskRequest, UpdateTaskStatusRequest,
};
use taskhub_server_db::DbError;

use crate::{
	api::AppState,
	error::ServerError,
	extract::{ApiJson, ApiPath, ApiQuery},
	pagination::page_request,
	validation,
};

fn default_sort() -> Sort<TaskSortField> {
	Sort::desc(TaskSortField::CreatedAt)
}

/// Run a filtered, paged query and shape the response.
pub(crate) async fn find_page(
	state: &AppState,
	criteria: &TaskFilterCriteria,
	page: PageRequest<TaskSortField>,
) -> Result<PageResponse<TaskResponse>, ServerError> {
	let predicate = compose(criteria);
	tracing::debug!(%predicate, "searching tasks");

	let (tasks, total) = state.task_repo.find_tasks(&predicate, &page).await?;
	let total = u64::try_from(total)
		.map_err(|_| ServerError::Internal(format!("negative task count {total}")))?;

	Ok(PageResponse::from_page(
		Page::new(tasks, &page, total),
		TaskResponse::from,
	))
}

async fn search(
	state: &AppState,
	params: &TaskSearchParams,
	page_params: &PageParams,
) -> Result<PageResponse<TaskResponse>, ServerError> {
	let (criteria, page) = validation::both(
		validation::criteria_from_params(params),
		page_request(page_params, &state.pagination, default_sort()),
	)?;
	find_page(state, &criteria, page).await
}

/// POST /api/v1/tasks - Create a task for an existing user.
#[tracing::instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn create_task(
	State(state): State<AppState>,
	ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let task = validation::new_task(&request)?;

	match state.task_repo.create_task(&task).await {
		Ok(()) => {}
		Err(DbError::NotFound(_)) => {
			return Err(ServerError::field(
				"userId",
				format!("user {} does not exist", task.owner_id),
			));
		}
		Err(e) => return Err(e.into()),
	}

	tracing::info!(task_id = %task.id, "task created");
	Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// GET /api/v1/tasks - Page through every task.
#[tracing::instrument(skip(state))]
pub async fn list_tasks(
	State(state): State<AppState>,
	ApiQuery(page_params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse<TaskResponse>>, ServerError> {
	let page = page_request(&page_params, &state.pagination, default_sort())?;
	let response = find_page(&state, &TaskFilterCriteria::default(), page).await?;
	Ok(Json(response))
}

/// GET /api/v1/tasks/search - Filter tasks by query parameters.
#[tracing::instrument(skip(state))]
pub async fn search_tasks(
	State(state): State<AppState>,
	ApiQuery(params): ApiQuery<TaskSearchParams>,
	ApiQuery(page_params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse<TaskResponse>>, ServerError> {
	Ok(Json(search(&state, &params, &page_params).await?))
}

/// POST /api/v1/tasks/search - Filter tasks by a JSON body.
///
/// Paging still comes from the query string.
#[tracing::instrument(skip(state, body))]
pub async fn search_tasks_body(
	State(state): State<AppState>,
	ApiQuery(page_params): ApiQuery<PageParams>,
	ApiJson(body): ApiJson<TaskSearchRequest>,
) -> Result<Json<PageResponse<TaskResponse>>, ServerError> {
	let params = TaskSearchParams::from(body);
	Ok(Json(search(&state, &params, &page_params).await?))
}

/// GET /api/v1/tasks/{id}
///
/// Soft-deleted tasks are still returned, with `isActive` false.
#[tracing::instrument(skip(state))]
pub async fn get_task(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
) -> Result<Json<TaskResponse>, ServerError> {
	let id = validation::path_task_id(&id)?;
	let task = state
		.task_repo
		.get_task_by_id(&id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("Task {id}")))?;
	Ok(Json(task.into()))
}

/// PUT /api/v1/tasks/{id} - Update the fields present in the body.
#[tracing::instrument(skip(state, request))]
pub async fn update_task(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
	ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ServerError> {
	let id = validation::path_task_id(&id)?;
	let mut task = state
		.task_repo
		.get_task_by_id(&id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("Task {id}")))?;

	validation::apply_task_update(&mut task, &request)?;
	state.task_repo.update_task(&task).await?;

	tracing::info!(task_id = %task.id, "task updated");
	Ok(Json(task.into()))
}

/// PATCH /api/v1/tasks/{id}/status
#[tracing::instrument(skip(state, request), fields(status = %request.status))]
pub async fn update_task_status(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
	ApiJson(request): ApiJson<UpdateTaskStatusRequest>,
) -> Result<Json<TaskResponse>, ServerError> {
	let id = validation::path_task_id(&id)?;
	let status = validation::parse_status_update(&request.status)?;
	let mut task = state
		.task_repo
		.get_task_by_id(&id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("Task {id}")))?;

	task.status = status;
	task.updated_at = chrono::Utc::now();
	state.task_repo.update_task(&task).await?;

	tracing::info!(task_id = %task.id, status = %task.status, "task status changed");
	Ok(Json(task.into()))
}

/// DELETE /api/v1/tasks/{id} - Soft delete: the row stays with `isActive` false.
#[tracing::instrument(skip(state))]
pub async fn delete_task(
	State(state): State<AppState>,
	ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ServerError> {
	let id = validation::path_task_id(&id)?;
	if !state.task_repo.soft_delete_task(&id).await? {
		return Err(ServerError::NotFound(format!("Task {id}")));
	}

	tracing::info!(task_id = %id, "task deactivated");
	Ok(StatusCode::NO_CONTENT)
}
