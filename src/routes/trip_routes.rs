//! Rutas de viajes
//!
//! Además del CRUD, expone los verbos del ciclo de vida como PATCH:
//! iniciar, completar y cancelar.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_lifecycle_controller::TripLifecycleController;
use crate::dto::common::ApiResponse;
use crate::dto::trip_dto::{
    CancelTripRequest, CompleteTripRequest, CreateTripRequest, StartTripRequest,
    TripCompletedResponse, TripCreatedResponse, TripFilters,
};
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, supervisor_or_admin_middleware,
};
use crate::models::trip::{Trip, TripListRow};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_trips))
        .route("/:id", get(get_trip));

    let mutations = Router::new()
        .route("/", post(create_trip))
        .route("/:id/start", patch(start_trip))
        .route("/:id/complete", patch(complete_trip))
        .route("/:id/cancel", patch(cancel_trip))
        .route_layer(middleware::from_fn(supervisor_or_admin_middleware));

    let admin = Router::new()
        .route("/:id", delete(delete_trip))
        .route_layer(middleware::from_fn(admin_only_middleware));

    reads
        .merge(mutations)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> TripLifecycleController {
    TripLifecycleController::new(state.pool.clone(), state.alert_thresholds())
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripCreatedResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(filters): Query<TripFilters>,
) -> Result<Json<Vec<TripListRow>>, AppError> {
    let trips = controller(&state).list(filters).await?;
    Ok(Json(trips))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, AppError> {
    let trip = controller(&state).get_by_id(id).await?;
    Ok(Json(trip))
}

async fn start_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<StartTripRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).start(id, request).await?;
    Ok(Json(response))
}

async fn complete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteTripRequest>,
) -> Result<Json<ApiResponse<TripCompletedResponse>>, AppError> {
    let response = controller(&state).complete(id, request).await?;
    Ok(Json(response))
}

async fn cancel_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelTripRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).cancel(id, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viaje eliminado exitosamente"
    })))
}
