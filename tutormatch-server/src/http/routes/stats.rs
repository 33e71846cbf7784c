//! Admin stats endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{ClientRepo, TutorRepo};
use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub tutors_count: i64,
    pub clients_count: i64,
    pub total_users: i64,
}

/// GET /api/admin/stats
async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let tutors = TutorRepo::new(&state.storage);
    let clients = ClientRepo::new(&state.storage);
    let (tutors_count, clients_count) = tokio::try_join!(tutors.count(), clients.count())?;

    Ok(Json(ApiResponse::success(
        StatsResponse {
            tutors_count,
            clients_count,
            total_users: tutors_count + clients_count,
        },
        "Admin stats retrieved successfully",
    )))
}

/// Stats routes (admin)
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/admin/stats", get(stats))
}
