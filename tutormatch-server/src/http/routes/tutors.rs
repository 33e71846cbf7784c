//! Tutor endpoints
//!
//! Public: list, create, lookup by email.
//! Admin (gated in `server`): get, update, delete by id.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::db::TutorRepo;
use crate::http::admin::AdminEmail;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::models::{Tutor, TutorInput};

/// GET /api/tutors - all tutors, newest first
async fn list_tutors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Tutor>>>, ApiError> {
    let tutors = TutorRepo::new(&state.storage).list().await?;
    Ok(Json(ApiResponse::success(tutors, "Tutors retrieved successfully")))
}

/// POST /api/tutors - create a tutor profile
async fn create_tutor(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<TutorInput>,
) -> Result<(StatusCode, Json<ApiResponse<Tutor>>), ApiError> {
    let input = input.validate()?;
    let tutor = TutorRepo::new(&state.storage).create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(tutor, "Tutor profile created successfully")),
    ))
}

/// GET /api/tutors/by-email/{email}
///
/// No match is a successful response with `data: null`.
async fn tutor_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Option<Tutor>>>, ApiError> {
    let tutor = TutorRepo::new(&state.storage).get_by_email(&email).await?;
    let message = if tutor.is_some() {
        "Tutor retrieved successfully"
    } else {
        "No tutor found with this email"
    };

    Ok(Json(ApiResponse::success(tutor, message)))
}

/// GET /api/admin/tutors/{id}
async fn get_tutor(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<Tutor>>, ApiError> {
    let tutor = TutorRepo::new(&state.storage).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(tutor, "Tutor retrieved successfully")))
}

/// PUT /api/admin/tutors/{id} - full replace of mutable fields
async fn update_tutor(
    State(state): State<Arc<AppState>>,
    Extension(AdminEmail(admin)): Extension<AdminEmail>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<TutorInput>,
) -> Result<Json<ApiResponse<Tutor>>, ApiError> {
    let input = input.validate()?;
    let tutor = TutorRepo::new(&state.storage).update(id, input).await?;

    tracing::info!(admin = %admin, id, "Admin updated tutor");
    Ok(Json(ApiResponse::success(tutor, "Tutor updated successfully")))
}

/// DELETE /api/admin/tutors/{id}
async fn delete_tutor(
    State(state): State<Arc<AppState>>,
    Extension(AdminEmail(admin)): Extension<AdminEmail>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    TutorRepo::new(&state.storage).delete(id).await?;

    tracing::info!(admin = %admin, id, "Admin deleted tutor");
    Ok(Json(ApiResponse::message("Tutor deleted successfully")))
}

/// Public tutor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tutors", get(list_tutors).post(create_tutor))
        .route("/api/tutors/by-email/{email}", get(tutor_by_email))
}

/// Admin tutor routes (caller applies the admin gate)
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/admin/tutors/{id}",
        get(get_tutor).put(update_tutor).delete(delete_tutor),
    )
}
