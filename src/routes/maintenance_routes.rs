//! Rutas de mantenimiento
//!
//! Programar es el POST de creación; completar es un PATCH de ciclo de vida.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_lifecycle_controller::MaintenanceLifecycleController;
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{
    CompleteMaintenanceRequest, MaintenanceFilters, MaintenanceScheduledResponse,
    MaintenanceStats, ScheduleMaintenanceRequest, UpdateMaintenanceRequest,
};
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, supervisor_or_admin_middleware,
};
use crate::models::maintenance::Maintenance;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_maintenance))
        .route("/stats", get(maintenance_stats))
        .route("/:id", get(get_maintenance))
        .route("/vehicle/:vehicle_id", get(vehicle_history));

    let mutations = Router::new()
        .route("/", post(schedule_maintenance))
        .route("/:id", put(update_maintenance))
        .route("/:id/complete", patch(complete_maintenance))
        .route_layer(middleware::from_fn(supervisor_or_admin_middleware));

    let admin = Router::new()
        .route("/:id", delete(delete_maintenance))
        .route_layer(middleware::from_fn(admin_only_middleware));

    reads
        .merge(mutations)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> MaintenanceLifecycleController {
    MaintenanceLifecycleController::new(state.pool.clone(), state.alert_thresholds())
}

async fn schedule_maintenance(
    State(state): State<AppState>,
    Json(request): Json<ScheduleMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceScheduledResponse>>, AppError> {
    let response = controller(&state).schedule(request).await?;
    Ok(Json(response))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<Maintenance>>, AppError> {
    let records = controller(&state).list(filters).await?;
    Ok(Json(records))
}

async fn maintenance_stats(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceStats>, AppError> {
    let stats = controller(&state).stats().await?;
    Ok(Json(stats))
}

async fn get_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Maintenance>, AppError> {
    let record = controller(&state).get_by_id(id).await?;
    Ok(Json(record))
}

async fn vehicle_history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<Maintenance>>, AppError> {
    let records = controller(&state).history_for_vehicle(vehicle_id).await?;
    Ok(Json(records))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<Maintenance>, AppError> {
    let record = controller(&state).update(id, request).await?;
    Ok(Json(record))
}

async fn complete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteMaintenanceRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).complete(id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Mantenimiento eliminado exitosamente"
    })))
}
