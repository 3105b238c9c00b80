use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{
    CreateDriverRequest, DriverFilters, DriverStatsResponse, UpdateDriverRequest,
};
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, supervisor_or_admin_middleware,
};
use crate::models::driver::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_drivers))
        .route("/:id", get(get_driver))
        .route("/:id/stats", get(driver_stats));

    let mutations = Router::new()
        .route("/", post(create_driver))
        .route("/:id", put(update_driver))
        .route("/:id/deactivate", patch(deactivate_driver))
        .route_layer(middleware::from_fn(supervisor_or_admin_middleware));

    let admin = Router::new()
        .route("/:id", delete(delete_driver))
        .route_layer(middleware::from_fn(admin_only_middleware));

    reads
        .merge(mutations)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let drivers = controller.list(filters).await?;
    Ok(Json(drivers))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let driver = controller.get_by_id(id).await?;
    Ok(Json(driver))
}

async fn driver_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverStatsResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let stats = controller.stats(id).await?;
    Ok(Json(stats))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn deactivate_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.deactivate(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Chofer desactivado exitosamente"
    })))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Chofer eliminado exitosamente"
    })))
}
