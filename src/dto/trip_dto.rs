//! DTOs del ciclo de vida de viajes

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::trip::TripStatus;

/// Request para crear un viaje (queda en estado programado)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub date: NaiveDate,

    #[validate(length(max = 200))]
    pub cargo: Option<String>,
}

/// Request para iniciar un viaje programado
#[derive(Debug, Deserialize)]
pub struct StartTripRequest {
    pub start_time: DateTime<Utc>,
}

/// Request para completar un viaje en curso
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteTripRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub fuel_used: Decimal,
    pub final_odometer: i64,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Request para cancelar un viaje no terminal
#[derive(Debug, Deserialize, Validate)]
pub struct CancelTripRequest {
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Response de creación de viaje
#[derive(Debug, Serialize)]
pub struct TripCreatedResponse {
    pub id: Uuid,
    pub status: TripStatus,
}

/// Response de viaje completado con las horas computadas
#[derive(Debug, Serialize)]
pub struct TripCompletedResponse {
    pub id: Uuid,
    pub status: TripStatus,
    /// Horas trabajadas (fraccionales) acreditadas al chofer
    pub hours_worked: f64,
    pub final_odometer: i64,
}

/// Filtros para listado de viajes
#[derive(Debug, Deserialize)]
pub struct TripFilters {
    pub status: Option<TripStatus>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}
