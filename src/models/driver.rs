//! Modelo de Driver
//!
//! Choferes de la flota. Las horas acumuladas solo las escribe la
//! finalización de viajes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del chofer - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "driver_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
        }
    }
}

/// Driver principal - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub id_card: String,
    pub license: String,
    pub phone: Option<String>,
    pub status: DriverStatus,
    /// Horas trabajadas acumuladas (fraccionales, no decrecientes).
    pub total_hours: f64,
    pub created_at: DateTime<Utc>,
}
