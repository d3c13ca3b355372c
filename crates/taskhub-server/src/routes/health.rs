// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use taskhub_server_api::HealthResponse;

use crate::api::AppState;

/// GET /health - Database connectivity check.
///
/// Returns 200 when a trivial query succeeds and 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	match sqlx::query("SELECT 1").execute(&state.pool).await {
		Ok(_) => (
			StatusCode::OK,
			Json(HealthResponse {
				status: "healthy".to_string(),
				database: "ok".to_string(),
			}),
		),
		Err(e) => {
			tracing::warn!(error = %e, "database health check failed");
			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(HealthResponse {
					status: "unhealthy".to_string(),
					database: "unreachable".to_string(),
				}),
			)
		}
	}
}
