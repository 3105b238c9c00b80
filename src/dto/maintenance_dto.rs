//! DTOs del ciclo de vida de mantenimientos

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::MaintenanceStatus;

/// Request para programar un mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct ScheduleMaintenanceRequest {
    pub vehicle_id: Uuid,
    pub date: NaiveDate,

    #[validate(length(min = 2, max = 50))]
    pub kind: String,

    #[validate(length(min = 2, max = 500))]
    pub description: String,

    pub cost: Decimal,
}

/// Request para completar un mantenimiento programado.
/// Costo y descripción finales son opcionales (mantienen los programados).
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteMaintenanceRequest {
    pub cost: Option<Decimal>,

    #[validate(length(min = 2, max = 500))]
    pub description: Option<String>,
}

/// Request para editar un mantenimiento aún programado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub date: Option<NaiveDate>,

    #[validate(length(min = 2, max = 50))]
    pub kind: Option<String>,

    #[validate(length(min = 2, max = 500))]
    pub description: Option<String>,

    pub cost: Option<Decimal>,
}

/// Response de mantenimiento programado
#[derive(Debug, Serialize)]
pub struct MaintenanceScheduledResponse {
    pub id: Uuid,
    pub status: MaintenanceStatus,
    /// Alerta informativa emitida si el costo excede el límite configurado
    pub high_cost_alert: Option<Uuid>,
}

/// Filtros para listado de mantenimientos
#[derive(Debug, Deserialize)]
pub struct MaintenanceFilters {
    pub status: Option<MaintenanceStatus>,
    pub vehicle_id: Option<Uuid>,
    pub kind: Option<String>,
}

/// Estadísticas generales de mantenimiento
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MaintenanceStats {
    pub total: i64,
    pub completed: i64,
    pub scheduled: i64,
    pub total_cost: Decimal,
    pub average_cost: Decimal,
}
