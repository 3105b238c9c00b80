//! Rutas de alertas
//!
//! La resolución por relación recibe la categoría como segmento de path
//! y responde con el número de alertas resueltas (idempotente).

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::alert_controller::AlertController;
use crate::dto::alert_dto::{
    AlertFilters, AlertListRow, AlertStats, CreateAlertRequest, DashboardAlertsQuery,
    RelationPath, ResolvedByRelationResponse,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, supervisor_or_admin_middleware,
};
use crate::models::alert::AlertCategory;
use crate::state::AppState;
use crate::utils::errors::AppError;

const DEFAULT_DASHBOARD_LIMIT: i64 = 10;

pub fn create_alert_router(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_alerts))
        .route("/stats", get(alert_stats))
        .route("/dashboard", get(dashboard_alerts))
        .route("/:id", get(get_alert));

    let mutations = Router::new()
        .route("/", post(create_alert))
        .route("/:id/resolve", patch(resolve_alert))
        .route(
            "/resolve-by-relation/:category/:id",
            patch(resolve_by_relation),
        )
        .route_layer(middleware::from_fn(supervisor_or_admin_middleware));

    let admin = Router::new()
        .route("/:id", delete(delete_alert))
        .route_layer(middleware::from_fn(admin_only_middleware));

    reads
        .merge(mutations)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> AlertController {
    AlertController::new(state.pool.clone(), state.alert_thresholds())
}

async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let response = controller(&state).create_manual(request).await?;
    Ok(Json(response))
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(filters): Query<AlertFilters>,
) -> Result<Json<Vec<AlertListRow>>, AppError> {
    let alerts = controller(&state).list(filters).await?;
    Ok(Json(alerts))
}

async fn alert_stats(State(state): State<AppState>) -> Result<Json<AlertStats>, AppError> {
    let stats = controller(&state).stats().await?;
    Ok(Json(stats))
}

async fn dashboard_alerts(
    State(state): State<AppState>,
    Query(query): Query<DashboardAlertsQuery>,
) -> Result<Json<Vec<AlertListRow>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_DASHBOARD_LIMIT);
    let alerts = controller(&state).active_for_dashboard(limit).await?;
    Ok(Json(alerts))
}

async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AlertListRow>, AppError> {
    let alert = controller(&state).get_by_id(id).await?;
    Ok(Json(alert))
}

async fn resolve_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).resolve(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Alerta resuelta exitosamente"
    })))
}

async fn resolve_by_relation(
    State(state): State<AppState>,
    Path(path): Path<RelationPath>,
) -> Result<Json<ResolvedByRelationResponse>, AppError> {
    let category = AlertCategory::parse(&path.category).ok_or_else(|| {
        AppError::BadRequest(format!("Categoría de alerta inválida: {}", path.category))
    })?;

    let response = controller(&state)
        .resolve_by_relation(category, path.id)
        .await?;
    Ok(Json(response))
}

async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Alerta eliminada exitosamente"
    })))
}
