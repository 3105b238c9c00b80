//! DTOs de choferes

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::{Driver, DriverStatus};

/// Request para crear un nuevo chofer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 5, max = 20))]
    pub id_card: String,

    #[validate(length(min = 5, max = 30))]
    pub license: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

/// Request para actualizar un chofer existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub id_card: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub license: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

/// Filtros para listado de choferes (estado + búsqueda libre)
#[derive(Debug, Deserialize)]
pub struct DriverFilters {
    pub status: Option<DriverStatus>,
    pub search: Option<String>,
}

/// Estadísticas de un chofer
#[derive(Debug, Serialize)]
pub struct DriverStatsResponse {
    #[serde(flatten)]
    pub driver: Driver,
    pub completed_trips: i64,
}
