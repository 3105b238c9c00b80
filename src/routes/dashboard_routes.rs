use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{FleetKpis, VehicleNearMaintenance};
use crate::middleware::auth::auth_middleware;
use crate::models::trip::TripListRow;
use crate::state::AppState;
use crate::utils::errors::AppError;

const DEFAULT_RECENT_TRIPS: i64 = 10;

#[derive(Debug, serde::Deserialize)]
struct RecentTripsQuery {
    limit: Option<i64>,
}

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/kpis", get(fleet_kpis))
        .route("/vehicles-near-maintenance", get(vehicles_near_maintenance))
        .route("/recent-trips", get(recent_trips))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> DashboardController {
    DashboardController::new(state.pool.clone(), state.alert_thresholds().warning_band)
}

async fn fleet_kpis(State(state): State<AppState>) -> Result<Json<FleetKpis>, AppError> {
    let kpis = controller(&state).fleet_kpis().await?;
    Ok(Json(kpis))
}

async fn vehicles_near_maintenance(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleNearMaintenance>>, AppError> {
    let vehicles = controller(&state).vehicles_near_maintenance().await?;
    Ok(Json(vehicles))
}

async fn recent_trips(
    State(state): State<AppState>,
    Query(query): Query<RecentTripsQuery>,
) -> Result<Json<Vec<TripListRow>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_TRIPS);
    let trips = controller(&state).recent_trips(limit).await?;
    Ok(Json(trips))
}
