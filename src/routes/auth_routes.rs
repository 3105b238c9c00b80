use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    // Registro de usuarios solo para administradores autenticados
    let admin = Router::new()
        .route("/register", post(register))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(login))
        .route("/roles", get(roles))
        .merge(admin)
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), JwtConfig::from(&state.config))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = controller(&state).login(request).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = controller(&state).register(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario registrado exitosamente".to_string(),
    )))
}

async fn roles() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "roles": ["administrator", "supervisor", "operator"]
    }))
}
