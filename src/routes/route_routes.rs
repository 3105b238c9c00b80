use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::common::ApiResponse;
use crate::dto::route_dto::{CreateRouteRequest, UpdateRouteRequest};
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, supervisor_or_admin_middleware,
};
use crate::models::route::Route;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router(state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_routes))
        .route("/:id", get(get_route));

    let mutations = Router::new()
        .route("/", post(create_route))
        .route("/:id", put(update_route))
        .route_layer(middleware::from_fn(supervisor_or_admin_middleware));

    let admin = Router::new()
        .route("/:id", delete(delete_route))
        .route_layer(middleware::from_fn(admin_only_middleware));

    reads
        .merge(mutations)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<Route>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let routes = controller.list().await?;
    Ok(Json(routes))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let route = controller.get_by_id(id).await?;
    Ok(Json(route))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Ruta eliminada exitosamente"
    })))
}
