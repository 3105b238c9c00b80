//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su enum de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
///
/// Invariante: `InUse` se corresponde con exactamente un viaje no terminal
/// que referencia al vehículo; `InMaintenance` con exactamente un
/// mantenimiento no terminal. Solo los controladores de ciclo de vida
/// escriben este campo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InUse,
    InMaintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::InMaintenance => "in_maintenance",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub kind: String,
    /// Kilometraje acumulado desde el último mantenimiento. No decrece
    /// dentro de un ciclo; solo completeMaintenance lo reinicia a 0.
    pub odometer: i64,
    /// Kilometraje al que el mantenimiento es obligatorio.
    pub service_limit: i64,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Kilómetros restantes antes del límite de servicio.
    /// Negativo si el vehículo ya excedió el límite.
    pub fn remaining_km(&self) -> i64 {
        self.service_limit - self.odometer
    }
}
