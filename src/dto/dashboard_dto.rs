//! DTOs del dashboard (solo lectura, nunca tocan el ciclo de vida)

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// KPIs agregados de la flota
#[derive(Debug, Serialize, FromRow)]
pub struct FleetKpis {
    pub total_vehicles: i64,
    pub vehicles_available: i64,
    pub vehicles_in_use: i64,
    pub vehicles_in_maintenance: i64,
    pub active_drivers: i64,
    pub trips_in_progress: i64,
    pub trips_completed_today: i64,
    pub active_alerts: i64,
    pub maintenance_cost_month: Decimal,
}

/// Vehículo próximo a mantenimiento (para el dashboard)
#[derive(Debug, Serialize, FromRow)]
pub struct VehicleNearMaintenance {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub odometer: i64,
    pub service_limit: i64,
    pub km_remaining: i64,
}
