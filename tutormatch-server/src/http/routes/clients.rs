//! Client endpoints, mirroring the tutor routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::db::ClientRepo;
use crate::http::admin::AdminEmail;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::models::{Client, ClientInput};

/// GET /api/clients
async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Client>>>, ApiError> {
    let clients = ClientRepo::new(&state.storage).list().await?;
    Ok(Json(ApiResponse::success(clients, "Clients retrieved successfully")))
}

/// POST /api/clients
async fn create_client(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<ClientInput>,
) -> Result<(StatusCode, Json<ApiResponse<Client>>), ApiError> {
    let input = input.validate()?;
    let client = ClientRepo::new(&state.storage).create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(client, "Client profile created successfully")),
    ))
}

/// GET /api/clients/by-email/{email}
async fn client_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Option<Client>>>, ApiError> {
    let client = ClientRepo::new(&state.storage).get_by_email(&email).await?;
    let message = match client {
        Some(_) => "Client retrieved successfully",
        None => "No client found with this email",
    };

    Ok(Json(ApiResponse::success(client, message)))
}

/// GET /api/admin/clients/{id}
async fn get_client(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<Client>>, ApiError> {
    let client = ClientRepo::new(&state.storage).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(client, "Client retrieved successfully")))
}

/// PUT /api/admin/clients/{id}
async fn update_client(
    State(state): State<Arc<AppState>>,
    Extension(AdminEmail(admin)): Extension<AdminEmail>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<ClientInput>,
) -> Result<Json<ApiResponse<Client>>, ApiError> {
    let input = input.validate()?;
    let client = ClientRepo::new(&state.storage).update(id, input).await?;

    tracing::info!(admin = %admin, id, "Admin updated client");
    Ok(Json(ApiResponse::success(client, "Client updated successfully")))
}

/// DELETE /api/admin/clients/{id}
async fn delete_client(
    State(state): State<Arc<AppState>>,
    Extension(AdminEmail(admin)): Extension<AdminEmail>,
    ValidId(id): ValidId,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    ClientRepo::new(&state.storage).delete(id).await?;

    tracing::info!(admin = %admin, id, "Admin deleted client");
    Ok(Json(ApiResponse::message("Client deleted successfully")))
}

/// Public client routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/by-email/{email}", get(client_by_email))
}

/// Admin client routes
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/admin/clients/{id}",
        get(get_client).put(update_client).delete(delete_client),
    )
}
