//! Modelo de Trip
//!
//! Viajes de la flota. Las transiciones de estado después de la creación
//! son responsabilidad exclusiva del TripLifecycleController.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del viaje - mapea al ENUM trip_status
///
/// Completed y Cancelled son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "trip_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Programmed,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Programmed => "programmed",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

/// Trip principal - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<DateTime<Utc>>,
    /// Solo se escribe al completar el viaje.
    pub end_time: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub cargo: Option<String>,
    pub fuel_used: Option<Decimal>,
    pub final_odometer: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fila de listado con joins (placa, chofer, ruta)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TripListRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub route_name: String,
}
