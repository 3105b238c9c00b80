//! DTOs de alertas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::alert::{AlertCategory, AlertPriority, AlertStatus};

/// Request para crear una alerta manual
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlertRequest {
    pub category: AlertCategory,
    pub related_id: Uuid,

    #[validate(length(min = 2, max = 500))]
    pub message: String,

    pub priority: Option<AlertPriority>,
}

/// Filtros para listado de alertas
#[derive(Debug, Deserialize)]
pub struct AlertFilters {
    pub status: Option<AlertStatus>,
    pub category: Option<AlertCategory>,
    pub priority: Option<AlertPriority>,
}

/// Fila de listado con la entidad relacionada resuelta (placa o nombre)
#[derive(Debug, Serialize, FromRow)]
pub struct AlertListRow {
    pub id: Uuid,
    pub category: AlertCategory,
    pub related_id: Uuid,
    pub message: String,
    pub priority: AlertPriority,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    /// Placa del vehículo o nombre del chofer según la categoría
    pub related_label: Option<String>,
    pub days_active: Option<i32>,
}

/// Response de resolución por relación (idempotente)
#[derive(Debug, Serialize)]
pub struct ResolvedByRelationResponse {
    pub resolved: u64,
}

/// Estadísticas generales de alertas
#[derive(Debug, Serialize, FromRow)]
pub struct AlertStats {
    pub total: i64,
    pub active: i64,
    pub resolved: i64,
    pub high_priority: i64,
    pub maintenance_alerts: i64,
    pub hours_alerts: i64,
}

/// Parámetros de path para resolver por relación
#[derive(Debug, Deserialize)]
pub struct RelationPath {
    pub category: String,
    pub id: Uuid,
}

/// Query para limitar alertas del dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardAlertsQuery {
    pub limit: Option<i64>,
}
