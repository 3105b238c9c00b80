//! DTOs de vehículos
//!
//! El estado del vehículo NO es actualizable por esta vía: solo los
//! controladores de ciclo de vida lo escriben.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub model: String,

    #[validate(length(min = 2, max = 50))]
    pub kind: String,

    #[validate(range(min = 0))]
    pub odometer: Option<i64>,

    #[validate(range(min = 1))]
    pub service_limit: Option<i64>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub kind: Option<String>,

    #[validate(range(min = 1))]
    pub service_limit: Option<i64>,
}

/// Filtros para listado de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
}

/// Estadísticas de un vehículo (viajes completados, combustible, km restantes)
#[derive(Debug, Serialize)]
pub struct VehicleStatsResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub total_trips: i64,
    pub total_fuel: Decimal,
    pub km_remaining: i64,
}
