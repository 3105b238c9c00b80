use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_logistics::config::environment::EnvironmentConfig;
use fleet_logistics::create_app;
use fleet_logistics::database::DatabaseConnection;
use fleet_logistics::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging (verboso solo en desarrollo)
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚛 Fleet Logistics - Backend de gestión de flota");
    info!("================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/register - Registrar usuario (admin)");
    info!("   GET  /api/auth/roles - Roles disponibles");
    info!("🚗 Vehículos:");
    info!("   GET|POST /api/vehicles - Listar / crear");
    info!("   GET|PUT|DELETE /api/vehicles/:id - Detalle / actualizar / eliminar");
    info!("   GET  /api/vehicles/:id/stats - Estadísticas");
    info!("👤 Choferes:");
    info!("   GET|POST /api/drivers - Listar / crear");
    info!("   GET|PUT|DELETE /api/drivers/:id - Detalle / actualizar / eliminar");
    info!("   PATCH /api/drivers/:id/deactivate - Desactivar");
    info!("   GET  /api/drivers/:id/stats - Estadísticas");
    info!("🗺️  Rutas:");
    info!("   GET|POST /api/routes - Listar / crear");
    info!("   GET|PUT|DELETE /api/routes/:id - Detalle / actualizar / eliminar");
    info!("🚚 Viajes:");
    info!("   GET|POST /api/trips - Listar / programar");
    info!("   PATCH /api/trips/:id/start - Iniciar viaje");
    info!("   PATCH /api/trips/:id/complete - Completar viaje");
    info!("   PATCH /api/trips/:id/cancel - Cancelar viaje");
    info!("🔧 Mantenimiento:");
    info!("   GET|POST /api/maintenance - Listar / programar");
    info!("   PATCH /api/maintenance/:id/complete - Completar mantenimiento");
    info!("   GET  /api/maintenance/vehicle/:id - Historial por vehículo");
    info!("   GET  /api/maintenance/stats - Estadísticas");
    info!("🚨 Alertas:");
    info!("   GET|POST /api/alerts - Listar / crear manual");
    info!("   PATCH /api/alerts/:id/resolve - Resolver");
    info!("   PATCH /api/alerts/resolve-by-relation/:category/:id - Resolver por relación");
    info!("   GET  /api/alerts/dashboard - Activas para el panel");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard/kpis - KPIs de flota");
    info!("   GET  /api/dashboard/vehicles-near-maintenance - Próximos a mantenimiento");
    info!("   GET  /api/dashboard/recent-trips - Últimos viajes");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
