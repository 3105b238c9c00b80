//! Modelo de Alert
//!
//! Alertas del sistema. Las crea y resuelve exclusivamente el AlertEngine,
//! siempre dentro de la transacción de un controlador de ciclo de vida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Categoría de alerta - mapea al ENUM alert_category
///
/// La relación depende de la categoría: maintenance_due → vehículo,
/// hours_exceeded → chofer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "alert_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    MaintenanceDue,
    HoursExceeded,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::MaintenanceDue => "maintenance_due",
            AlertCategory::HoursExceeded => "hours_exceeded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "maintenance_due" => Some(AlertCategory::MaintenanceDue),
            "hours_exceeded" => Some(AlertCategory::HoursExceeded),
            _ => None,
        }
    }
}

/// Prioridad de alerta - mapea al ENUM alert_priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "alert_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

/// Estado de alerta - mapea al ENUM alert_status
///
/// Resolved es terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "alert_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// Alert principal - mapea exactamente a la tabla alerts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub category: AlertCategory,
    /// Entidad relacionada según la categoría (vehículo o chofer).
    pub related_id: Uuid,
    pub message: String,
    pub priority: AlertPriority,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_roundtrip() {
        assert_eq!(
            AlertCategory::parse("maintenance_due"),
            Some(AlertCategory::MaintenanceDue)
        );
        assert_eq!(
            AlertCategory::parse(AlertCategory::HoursExceeded.as_str()),
            Some(AlertCategory::HoursExceeded)
        );
        assert_eq!(AlertCategory::parse("unknown"), None);
    }
}
