//! Backend de logística de flota
//!
//! API HTTP para la gestión de vehículos, choferes, rutas, viajes,
//! mantenimientos y alertas. El ciclo de vida de viajes y mantenimientos
//! corre en transacciones con bloqueo de fila; el motor de alertas evalúa
//! umbrales de kilometraje dentro de esas mismas transacciones.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Json, Router};

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Ensamblar el router completo de la API
pub fn create_app(state: AppState) -> Router {
    // Con orígenes configurados el CORS deja de ser permisivo
    let cors = if state.config.cors_origins.iter().any(|o| o == "*") {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest(
            "/api/vehicles",
            routes::vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest(
            "/api/drivers",
            routes::driver_routes::create_driver_router(state.clone()),
        )
        .nest(
            "/api/routes",
            routes::route_routes::create_route_router(state.clone()),
        )
        .nest(
            "/api/trips",
            routes::trip_routes::create_trip_router(state.clone()),
        )
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(state.clone()),
        )
        .nest(
            "/api/alerts",
            routes::alert_routes::create_alert_router(state.clone()),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(state.clone()),
        )
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "fleet-logistics",
        "status": "healthy"
    }))
}
